//! Scripted in-memory content provider for tests.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! pitchboard-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use pitchboard_core::mock::{MockProvider, MockResponse};
//! use pitchboard_core::query::ContentQuery;
//!
//! let provider = MockProvider::new().with_response(
//!     ContentQuery::playlist_by_slug("startup-of-the-day"),
//!     MockResponse::null().with_delay(Duration::from_millis(30)),
//! );
//! let service = provider.clone().into_service();
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde_json::Value;

use crate::provider::{ContentProvider, ContentService};
use crate::query::ContentQuery;
use crate::{Error, ErrorKind, Result, ServiceHealth};

/// Scripted answer to one query.
#[derive(Debug, Clone)]
pub struct MockResponse {
    outcome: Result<Value, ErrorKind>,
    delay: Duration,
}

impl MockResponse {
    /// Answers with the given value.
    pub fn value(value: Value) -> Self {
        Self {
            outcome: Ok(value),
            delay: Duration::ZERO,
        }
    }

    /// Answers with `null` (nothing matched).
    pub fn null() -> Self {
        Self::value(Value::Null)
    }

    /// Fails with an error of the given kind.
    pub fn failure(kind: ErrorKind) -> Self {
        Self {
            outcome: Err(kind),
            delay: Duration::ZERO,
        }
    }

    /// Answers only after `delay` has elapsed.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Content provider answering from a table of scripted responses.
///
/// Queries without a scripted response resolve to `null`. Every call is
/// recorded, in invocation order, as the query's cache key.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    responses: Arc<HashMap<String, MockResponse>>,
    calls: Arc<Mutex<Vec<String>>>,
    health: Option<ServiceHealth>,
}

impl MockProvider {
    /// Creates a provider with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the response to `query`.
    pub fn with_response(mut self, query: ContentQuery, response: MockResponse) -> Self {
        Arc::make_mut(&mut self.responses).insert(query.cache_key(), response);
        self
    }

    /// Overrides the health report (healthy by default).
    pub fn with_health(mut self, health: ServiceHealth) -> Self {
        self.health = Some(health);
        self
    }

    /// Cache keys of every query issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times a query with the given name was issued.
    pub fn call_count(&self, name: &str) -> usize {
        self.calls()
            .iter()
            .filter(|key| key.split(' ').next() == Some(name))
            .count()
    }

    /// Wraps a clone of this provider into a [`ContentService`].
    pub fn into_service(self) -> ContentService {
        ContentService::new(self)
    }
}

#[async_trait::async_trait]
impl ContentProvider for MockProvider {
    async fn fetch(&self, query: &ContentQuery) -> Result<Value> {
        let key = query.cache_key();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(key.clone());

        let Some(response) = self.responses.get(&key).cloned() else {
            return Ok(Value::Null);
        };

        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }

        response
            .outcome
            .map_err(|kind| Error::new(kind).with_message("Scripted failure").with_context(query.name))
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(self.health.clone().unwrap_or_else(ServiceHealth::healthy))
    }
}
