//! Health reporting for the content store.

use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Operational status of a backing service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Service is operating normally.
    #[default]
    Healthy,
    /// Service answers, but slowly or partially.
    Degraded,
    /// Service is not reachable.
    Unhealthy,
}

/// Result of a single health probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    /// Current service status.
    pub status: ServiceStatus,
    /// Round-trip time of the probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<Duration>,
    /// Describes the current state when not healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// When the probe was performed.
    pub checked_at: Timestamp,
}

impl ServiceHealth {
    fn with_status(status: ServiceStatus, message: Option<String>) -> Self {
        Self {
            status,
            response_time: None,
            message,
            checked_at: Timestamp::now(),
        }
    }

    /// Creates a healthy report.
    pub fn healthy() -> Self {
        Self::with_status(ServiceStatus::Healthy, None)
    }

    /// Creates a degraded report.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self::with_status(ServiceStatus::Degraded, Some(message.into()))
    }

    /// Creates an unhealthy report.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self::with_status(ServiceStatus::Unhealthy, Some(message.into()))
    }

    /// Sets the response time for this probe.
    pub fn with_response_time(mut self, response_time: Duration) -> Self {
        self.response_time = Some(response_time);
        self
    }

    /// Returns `true` unless the service is unhealthy.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status != ServiceStatus::Unhealthy
    }
}
