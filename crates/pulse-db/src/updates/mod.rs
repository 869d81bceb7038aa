//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. Nullable columns use
//! `Option<Option<T>>`: `Some(None)` clears the column.
//!
//! The structs also deserialize straight from request bodies: a missing key
//! leaves the field untouched, an explicit `null` clears it.

pub mod business;
pub mod form;
pub mod product;

pub use business::{BusinessUpdate, BusinessUpdateBuilder};
pub use form::{FormUpdate, FormUpdateBuilder};
pub use product::{ProductUpdate, ProductUpdateBuilder};

use serde::{Deserialize, Deserializer};

/// Distinguish an absent key (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
