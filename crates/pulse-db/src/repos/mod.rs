//! Repository modules implementing the SQL side of every store operation.
//!
//! Each module adds methods to `SqlStore` via `impl SqlStore` blocks.

pub mod business;
pub mod event;
pub mod form;
pub mod product;
pub mod social;
pub mod submission;
pub mod user;
