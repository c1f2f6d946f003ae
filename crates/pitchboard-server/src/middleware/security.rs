//! CORS, response hardening headers, compression and the body limit.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderName, HeaderValue};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Tracing target for CORS setup.
const TRACING_TARGET: &str = "pitchboard_server::middleware::security";

/// Largest accepted request body. Every route is a read.
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Origins of local frontends, used when no origin is configured.
const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Headers set on every response. The API only serves JSON, so nothing may
/// frame it or load sub-resources through it.
const HARDENING_HEADERS: [(HeaderName, &str); 4] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::REFERRER_POLICY, "no-referrer"),
    (
        header::CONTENT_SECURITY_POLICY,
        "default-src 'none'; frame-ancestors 'none'",
    ),
];

/// Applies CORS, hardening headers, compression and the body limit.
pub trait RouterSecurityExt<S> {
    fn with_security(self, cors: &CorsConfig) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig) -> Self {
        let router = HARDENING_HEADERS
            .into_iter()
            .fold(self, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::overriding(
                    name,
                    HeaderValue::from_static(value),
                ))
            });

        router
            .layer(cors.layer())
            .layer(CompressionLayer::new())
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
    }
}

/// Which browser origins may read the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Comma-separated origins; local frontends when empty.
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-origins", env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub origins: Vec<String>,

    /// Seconds browsers may cache a preflight answer.
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-max-age", env = "CORS_MAX_AGE", default_value_t = 3600)
    )]
    pub max_age: u64,

    /// Whether cookies and auth headers may accompany cross-origin requests.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "cors-allow-credentials",
            env = "CORS_ALLOW_CREDENTIALS",
            default_value_t = false,
            action = clap::ArgAction::Set
        )
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: Vec::new(),
            max_age: 3600,
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Parsed origins. Values that are not valid header values are dropped.
    pub fn allowed_origins(&self) -> Vec<HeaderValue> {
        if self.origins.is_empty() {
            return LOCAL_ORIGINS.map(HeaderValue::from_static).to_vec();
        }

        self.origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(target: TRACING_TARGET, %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect()
    }

    fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed_origins()))
            .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
            .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
            .allow_credentials(self.allow_credentials)
            .max_age(Duration::from_secs(self.max_age))
    }
}
