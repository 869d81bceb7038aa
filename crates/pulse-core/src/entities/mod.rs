//! Entity structs for all Pulse domain objects.
//!
//! Each persisted entity maps to a table in the SQL store (see
//! `pulse-db/migrations`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod business;
mod categorization;
mod customer;
mod event;
mod form;
mod product;
mod social;
mod submission;
mod user;

pub use business::Business;
pub use categorization::FieldCategorization;
pub use customer::{CustomerProfile, CustomerSegment};
pub use event::AnalyticsEvent;
pub use form::{FeedbackForm, FormField};
pub use product::Product;
pub use social::SocialLink;
pub use submission::FeedbackSubmission;
pub use user::{User, UserBusinessAccess};
