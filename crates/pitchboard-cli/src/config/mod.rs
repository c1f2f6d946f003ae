//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # Host, port, TLS, shutdown
//! ├── middleware: MiddlewareConfig # CORS, recovery/timeouts
//! └── service: ServiceConfig       # Sanity content store, editor's picks
//! ```
//!
//! Every option can be provided as a CLI argument or an environment variable.

mod server;

use std::process;

use anyhow::Context;
use clap::{Args, Parser};
use pitchboard_server::middleware::{CorsConfig, RecoveryConfig};
use pitchboard_server::service::ServiceConfig;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use self::server::ServerConfig;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Browser access and request deadline.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[clap(flatten)]
    pub cors: CorsConfig,

    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "pitchboard")]
#[command(about = "Startup pitch browsing API server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Content store configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads the `.env` file (if enabled) and parses CLI arguments.
    ///
    /// The `.env` file is read first so clap's `env` fallbacks see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with `RUST_LOG` filtering, `info` by default.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    fn log_build_info() {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "starting pitchboard server"
        );

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .validate()
            .context("invalid content store configuration")?;
        Ok(())
    }

    /// Logs configuration without secrets.
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();

        let MiddlewareConfig { cors, recovery } = &self.middleware;
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            cors_origins = ?cors.origins,
            cors_max_age_secs = cors.max_age,
            cors_allow_credentials = cors.allow_credentials,
            request_timeout_secs = recovery.request_timeout,
            "Middleware configuration"
        );

        let sanity = &self.service.sanity;
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            project_id = %sanity.project_id,
            dataset = %sanity.dataset,
            api_version = %sanity.api_version,
            use_cdn = sanity.use_cdn,
            has_token = sanity.token.is_some(),
            http_timeout_secs = sanity.http_timeout,
            editor_picks_slug = %self.service.editor_picks_slug,
            "Content store configuration"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "tls").then_some("tls"),
            cfg!(feature = "dotenv").then_some("dotenv"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_arguments() {
        let cli = Cli::try_parse_from([
            "pitchboard",
            "--sanity-project-id",
            "abc123",
            "--port",
            "8080",
        ])
        .unwrap();

        assert_eq!(cli.server.port, 8080);
        assert_eq!(cli.middleware.recovery.request_timeout, 30);
        assert!(!cli.middleware.cors.allow_credentials);
        assert_eq!(cli.service.sanity.project_id, "abc123");
        assert_eq!(cli.service.editor_picks_slug, "startup-of-the-day");
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn parses_cors_origins() {
        let cli = Cli::try_parse_from([
            "pitchboard",
            "--sanity-project-id",
            "abc123",
            "--cors-origins",
            "https://a.dev,https://b.dev",
            "--cors-allow-credentials",
            "true",
        ])
        .unwrap();

        assert_eq!(cli.middleware.cors.origins, ["https://a.dev", "https://b.dev"]);
        assert!(cli.middleware.cors.allow_credentials);
    }
}
