//! Sanity client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use pitchboard_core::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default dataset name.
pub const DEFAULT_DATASET: &str = "production";

/// Default API version, as a release date.
pub const DEFAULT_API_VERSION: &str = "2024-10-01";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Sanity content store client.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SanityConfig {
    /// Sanity project identifier
    #[cfg_attr(
        feature = "config",
        arg(long = "sanity-project-id", env = "SANITY_PROJECT_ID")
    )]
    pub project_id: String,

    /// Dataset to query
    #[cfg_attr(
        feature = "config",
        arg(long = "sanity-dataset", env = "SANITY_DATASET", default_value = DEFAULT_DATASET)
    )]
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// API version (a `YYYY-MM-DD` release date)
    #[cfg_attr(
        feature = "config",
        arg(long = "sanity-api-version", env = "SANITY_API_VERSION", default_value = DEFAULT_API_VERSION)
    )]
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Query the edge cache instead of the live API
    #[cfg_attr(
        feature = "config",
        arg(
            long = "sanity-use-cdn",
            env = "SANITY_USE_CDN",
            default_value_t = true,
            action = clap::ArgAction::Set
        )
    )]
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,

    /// Read token for private datasets
    #[cfg_attr(feature = "config", arg(long = "sanity-token", env = "SANITY_TOKEN"))]
    #[serde(default)]
    pub token: Option<String>,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "sanity-http-timeout", env = "SANITY_HTTP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,
}

fn default_dataset() -> String {
    DEFAULT_DATASET.to_owned()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_owned()
}

const fn default_use_cdn() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl std::fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("use_cdn", &self.use_cdn)
            .field("has_token", &self.token.is_some())
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl SanityConfig {
    /// Creates a configuration for `project_id` with every other field defaulted.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: default_use_cdn(),
            token: None,
            http_timeout: default_timeout_secs(),
        }
    }

    /// Validates identifiers and the API version.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.project_id) {
            return Err(Error::configuration()
                .with_message("Sanity project id must be lowercase alphanumerics, dashes or underscores")
                .with_context(self.project_id.clone()));
        }

        if !is_identifier(&self.dataset) || self.dataset.len() > 64 {
            return Err(Error::configuration()
                .with_message("Sanity dataset must be at most 64 lowercase alphanumerics, dashes or underscores")
                .with_context(self.dataset.clone()));
        }

        if !is_api_version(&self.api_version) {
            return Err(Error::configuration()
                .with_message("Sanity API version must be `1`, `X` or a YYYY-MM-DD date")
                .with_context(self.api_version.clone()));
        }

        if self.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(Error::configuration().with_message("Sanity token cannot be blank"));
        }

        Ok(())
    }

    /// Returns the API host, e.g. `https://abc123.apicdn.sanity.io`.
    pub fn base_url(&self) -> Result<Url> {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        let raw = format!("https://{}.{host}.sanity.io", self.project_id);

        Url::parse(&raw).map_err(|e| {
            Error::from_source(pitchboard_core::ErrorKind::Configuration, e)
                .with_message("Invalid Sanity project id")
        })
    }

    /// Returns the query endpoint of the configured dataset.
    pub fn query_url(&self) -> Result<Url> {
        let mut url = self.base_url()?;
        url.set_path(&format!(
            "/v{}/data/query/{}",
            self.api_version, self.dataset
        ));
        Ok(url)
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the user agent sent with every request.
    pub fn user_agent(&self) -> String {
        format!("pitchboard/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Set the dataset.
    #[must_use]
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Enable or disable the edge cache.
    #[must_use]
    pub fn with_cdn(mut self, use_cdn: bool) -> Self {
        self.use_cdn = use_cdn;
        self
    }

    /// Set the read token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

fn is_api_version(value: &str) -> bool {
    if matches!(value, "1" | "X") {
        return true;
    }

    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}
