//! CLI configuration.

use anyhow::{Context, Result};
use url::Url;

/// Default service root.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/FROST-Server/v1.1";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Service root used to build resource URLs
    pub endpoint: Url,

    /// Log filter directive; falls back to `RUST_LOG` when unset
    pub log_filter: Option<String>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STA_ENDPOINT`: Service root URL
    /// - `STA_LOG`: Log filter (overrides `RUST_LOG`)
    ///
    /// # Errors
    ///
    /// Returns error if `STA_ENDPOINT` is not an absolute URL.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = lookup("STA_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            endpoint: Url::parse(&endpoint).context("Invalid STA_ENDPOINT")?,
            log_filter: lookup("STA_LOG"),
        })
    }
}
