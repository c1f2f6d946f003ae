//! Health monitoring handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pitchboard_core::provider::ContentService;

use crate::handler::Result;
use crate::handler::response::MonitorStatus;
use crate::service::{HealthCache, ServiceState};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "pitchboard_server::handler::monitors";

/// Reports the content store health and the server version.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(content): State<ContentService>,
    State(health_cache): State<HealthCache>,
) -> Result<(StatusCode, Json<MonitorStatus>)> {
    let health = health_cache.check(&content).await;
    let status_code = if health.is_available() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        status = ?health.status,
        message = health.message.as_deref(),
        "Health status checked"
    );

    Ok((status_code, Json(MonitorStatus::from(health))))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use pitchboard_core::ServiceHealth;
    use pitchboard_core::mock::MockProvider;
    use serde_json::Value;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn healthy_content_store() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::new())?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["checkedAt"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn unhealthy_content_store() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_health(ServiceHealth::unhealthy("down"));
        let server = create_test_server(provider)?;

        let response = server.get("/health").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = response.json();
        assert_eq!(body["status"], "unhealthy");
        Ok(())
    }
}
