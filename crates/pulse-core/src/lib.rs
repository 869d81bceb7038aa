//! # pulse-core
//!
//! Core types, ID generation, and error types for Pulse.
//!
//! This crate provides the foundational types shared across all Pulse crates:
//! - Entity structs for all domain objects (businesses, forms, submissions, etc.)
//! - Status and category enums
//! - ID prefix constants and generation
//! - Cross-cutting error types
//! - API response types shared by the server and the CLI

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod responses;
