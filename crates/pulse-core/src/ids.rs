//! ID prefixes and generation.
//!
//! Every entity ID has the form `{prefix}-{8 hex chars}`, e.g. `biz-a3f8b2c1`.
//! The SQL store generates the random part with `randomblob(4)`; the in-memory
//! store uses [`generate`].

use crate::errors::CoreError;

pub const PREFIX_BUSINESS: &str = "biz";
pub const PREFIX_USER: &str = "usr";
pub const PREFIX_FORM: &str = "frm";
pub const PREFIX_SUBMISSION: &str = "sub";
pub const PREFIX_EVENT: &str = "evt";
pub const PREFIX_SOCIAL_LINK: &str = "lnk";
pub const PREFIX_PRODUCT: &str = "prd";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_BUSINESS,
    PREFIX_USER,
    PREFIX_FORM,
    PREFIX_SUBMISSION,
    PREFIX_EVENT,
    PREFIX_SOCIAL_LINK,
    PREFIX_PRODUCT,
];

/// Generate a prefixed ID from 4 random bytes.
///
/// # Errors
///
/// Returns `CoreError::IdGeneration` if the OS random source is unavailable.
pub fn generate(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::IdGeneration(e.to_string()))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

/// Check whether `id` has the shape `{prefix}-{8 hex}` for the given prefix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
