//! Monitor response types.

use jiff::Timestamp;
use pitchboard_core::{ServiceHealth, ServiceStatus};
use serde::Serialize;

/// System monitoring status response.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// When the content store was last probed.
    pub checked_at: Timestamp,
    /// Content store status.
    pub status: ServiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Application version.
    pub version: String,
}

impl From<ServiceHealth> for MonitorStatus {
    fn from(health: ServiceHealth) -> Self {
        Self {
            checked_at: health.checked_at,
            status: health.status,
            response_time_ms: health
                .response_time
                .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}
