//! Database backend configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// libSQL location: a file path, `:memory:`, or a remote
    /// `libsql://` / `https://` URL. Empty selects the in-memory store.
    #[serde(default)]
    pub url: String,

    /// Auth token for remote databases.
    #[serde(default)]
    pub auth_token: String,
}

impl DatabaseConfig {
    /// Whether a SQL database is configured at all.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Whether the URL points at a remote server rather than a local file.
    pub fn is_remote(&self) -> bool {
        let url = self.url.trim();
        url.starts_with("libsql://") || url.starts_with("https://") || url.starts_with("http://")
    }
}
