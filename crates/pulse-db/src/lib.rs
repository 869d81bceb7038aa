//! # pulse-db
//!
//! Storage for Pulse: businesses, users, forms, submissions, analytics
//! events, social links, and products.
//!
//! Two [`FeedbackStore`] implementations share one contract:
//! [`MemoryStore`] (used when no database url is configured) and
//! [`SqlStore`] on libSQL (local file, `:memory:`, or a remote Turso url).
//! [`StoreBackend`] picks one from configuration once at startup. Store
//! errors always propagate; nothing falls back to sample data.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29).

mod backend;
pub mod demo;
pub mod error;
pub mod helpers;
pub mod inputs;
mod memory;
mod migrations;
pub mod repos;
pub mod service;
mod sql;
pub mod store;
pub mod updates;

pub use backend::StoreBackend;
pub use error::DatabaseError;
pub use inputs::{
    NewBusiness, NewEvent, NewForm, NewProduct, NewSocialLink, NewSubmission, NewUser,
    SubmissionFilter,
};
pub use memory::MemoryStore;
pub use service::{FeedbackInput, FeedbackService};
pub use sql::SqlStore;
pub use store::FeedbackStore;
pub use updates::{
    BusinessUpdate, BusinessUpdateBuilder, FormUpdate, FormUpdateBuilder, ProductUpdate,
    ProductUpdateBuilder,
};
