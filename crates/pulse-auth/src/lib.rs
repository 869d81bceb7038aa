//! # pulse-auth
//!
//! Authentication for Pulse businesses and customers.
//!
//! Passwords are hashed with bcrypt (on tokio's blocking pool), sessions are
//! stateless HS256 JWTs from `jsonwebtoken`. Registration and login flows
//! run against any [`pulse_db::FeedbackStore`].

pub mod error;
pub mod flows;
pub mod password;
pub mod token;
pub mod validate;

pub use error::AuthError;
pub use flows::{Authenticator, Credentials, RegisterBusiness, RegisterCustomer};
pub use token::{Claims, TokenSigner, bearer_token};
