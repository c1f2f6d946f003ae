//! Content store health probing with a short-lived cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pitchboard_core::ServiceHealth;
use pitchboard_core::provider::ContentService;
use tokio::sync::Mutex;

/// Tracing target for health checks.
const TRACING_TARGET: &str = "pitchboard_server::service::health";

/// Default cache duration for health checks.
const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(30);

/// Caches the last content store health report.
///
/// Concurrent callers wait for a single probe instead of each issuing one.
#[derive(Debug, Clone)]
pub struct HealthCache {
    last: Arc<Mutex<Option<(Instant, ServiceHealth)>>>,
    cache_duration: Duration,
}

impl Default for HealthCache {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthCache {
    /// Creates a cache with the default duration.
    pub fn new() -> Self {
        Self::with_cache_duration(DEFAULT_CACHE_DURATION)
    }

    /// Creates a cache keeping reports for `cache_duration`.
    pub fn with_cache_duration(cache_duration: Duration) -> Self {
        Self {
            last: Arc::new(Mutex::new(None)),
            cache_duration,
        }
    }

    /// Returns the cached report, probing the content store when stale.
    pub async fn check(&self, content: &ContentService) -> ServiceHealth {
        let mut last = self.last.lock().await;

        if let Some((checked_at, health)) = last.as_ref()
            && checked_at.elapsed() < self.cache_duration
        {
            return health.clone();
        }

        let health = content
            .health_check()
            .await
            .unwrap_or_else(|error| ServiceHealth::unhealthy(error.to_string()));

        tracing::info!(
            target: TRACING_TARGET,
            status = ?health.status,
            response_ms = health.response_time.map(|d| d.as_millis()),
            "Content store health checked"
        );

        *last = Some((Instant::now(), health.clone()));
        health
    }

    /// Drops the cached report.
    pub async fn invalidate(&self) {
        *self.last.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use pitchboard_core::ServiceStatus;
    use pitchboard_core::mock::MockProvider;

    use super::*;

    #[tokio::test]
    async fn caches_report() {
        let cache = HealthCache::new();
        let content = MockProvider::new()
            .with_health(ServiceHealth::unhealthy("down"))
            .into_service();

        let health = cache.check(&content).await;
        assert_eq!(health.status, ServiceStatus::Unhealthy);

        let healthy = MockProvider::new().into_service();
        assert_eq!(cache.check(&healthy).await.status, ServiceStatus::Unhealthy);

        cache.invalidate().await;
        assert_eq!(cache.check(&healthy).await.status, ServiceStatus::Healthy);
    }
}
