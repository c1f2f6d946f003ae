//! Request deadline and panic recovery.
//!
//! Both failure modes end in a JSON `internal_server_error` body instead of a
//! dropped connection or a bare status line.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::ErrorKind;

/// Tracing target for recovered requests.
const TRACING_TARGET: &str = "pitchboard_server::middleware::recovery";

/// How long a request may run before it is abandoned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may take, content store round trips included.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout: 30,
        }
    }
}

/// Applies the request deadline and panic recovery.
pub trait RouterRecoveryExt<S> {
    fn with_recovery(self, config: &RecoveryConfig) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        let deadline = Duration::from_secs(config.request_timeout);

        self.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |error: tower::BoxError| async move {
                    recover_error(error, deadline)
                }))
                .layer(CatchPanicLayer::custom(recover_panic))
                .layer(TimeoutLayer::new(deadline)),
        )
    }
}

fn recover_error(error: tower::BoxError, deadline: Duration) -> Response {
    if error.is::<Elapsed>() {
        tracing::warn!(
            target: TRACING_TARGET,
            deadline_secs = deadline.as_secs(),
            "Request exceeded its deadline"
        );

        return ErrorKind::InternalServerError
            .with_message("The request took too long")
            .with_context(format!("deadline of {}s elapsed", deadline.as_secs()))
            .into_response();
    }

    tracing::error!(target: TRACING_TARGET, %error, "Middleware failed");
    ErrorKind::InternalServerError
        .with_context(error.to_string())
        .into_response()
}

fn recover_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");

    tracing::error!(target: TRACING_TARGET, panic = detail, "Handler panicked");
    ErrorKind::InternalServerError.into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;
    use serde_json::Value;

    use super::*;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    async fn explode() -> &'static str {
        panic!("boom")
    }

    fn server(request_timeout: u64) -> anyhow::Result<TestServer> {
        let router = Router::new()
            .route("/slow", get(slow))
            .route("/explode", get(explode))
            .with_recovery(&RecoveryConfig { request_timeout });
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn deadline_gives_json_error() -> anyhow::Result<()> {
        let response = server(0)?.get("/slow").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["name"], "internal_server_error");
        Ok(())
    }

    #[tokio::test]
    async fn panic_gives_json_error() -> anyhow::Result<()> {
        let response = server(30)?.get("/explode").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["name"], "internal_server_error");
        Ok(())
    }
}
