//! Reqwest-based client for the Sanity query API.

use std::sync::Arc;
use std::time::Instant;

use pitchboard_core::provider::{ContentProvider, ContentService};
use pitchboard_core::query::ContentQuery;
use pitchboard_core::ServiceHealth;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{Error, SanityConfig, TRACING_TARGET};

/// Successful query response body.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Error response body, e.g. `{"error": {"description": "..."}}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<ErrorDetails>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetails {
    #[serde(default)]
    description: Option<String>,
}

/// Inner client that holds the HTTP client and configuration.
struct SanityClientInner {
    http: Client,
    config: SanityConfig,
    query_url: Url,
}

/// Content provider backed by the Sanity HTTP query API.
///
/// # Examples
///
/// ```rust,ignore
/// use pitchboard_sanity::{SanityClient, SanityConfig};
///
/// let client = SanityClient::new(SanityConfig::new("abc123"))?;
/// let startups = client.into_service().startups(None).await?;
/// ```
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

impl std::fmt::Debug for SanityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl SanityClient {
    /// Creates a new client, validating the configuration.
    pub fn new(config: SanityConfig) -> pitchboard_core::Result<Self> {
        config.validate()?;

        let timeout = config.effective_timeout();
        let query_url = config.query_url()?;

        tracing::debug!(
            target: TRACING_TARGET,
            url = %query_url,
            timeout_ms = timeout.as_millis(),
            has_token = config.token.is_some(),
            "Creating Sanity client"
        );

        let mut headers = HeaderMap::new();
        if let Some(token) = config.token.as_deref() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                pitchboard_core::Error::configuration()
                    .with_message("Sanity token contains invalid characters")
                    .with_source(e)
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent())
            .default_headers(headers)
            .build()
            .map_err(Error::from)?;

        let inner = SanityClientInner {
            http,
            config,
            query_url,
        };

        tracing::info!(
            target: TRACING_TARGET,
            project_id = %inner.config.project_id,
            dataset = %inner.config.dataset,
            use_cdn = inner.config.use_cdn,
            "Sanity client created successfully"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &SanityConfig {
        &self.inner.config
    }

    /// Converts this client into a [`ContentService`] for use with dependency injection.
    pub fn into_service(self) -> ContentService {
        ContentService::new(self)
    }

    /// Builds the request URL for a query, encoding each parameter as `$name=<json>`.
    pub fn request_url(&self, query: &ContentQuery) -> Result<Url, Error> {
        let mut url = self.inner.query_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query.groq);
            for (name, value) in &query.params {
                pairs.append_pair(&format!("${name}"), &serde_json::to_string(value)?);
            }
        }

        Ok(url)
    }

    async fn execute(&self, query: &ContentQuery) -> Result<Value, Error> {
        let url = self.request_url(query)?;
        let response = self.inner.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body: QueryResponse = response.json().await?;
        Ok(body.result)
    }

    async fn status_error(response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed: ErrorResponse = serde_json::from_str(&body).unwrap_or_default();

        let description = parsed
            .error
            .and_then(|e| e.description)
            .or(parsed.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_owned()
            });

        Error::Status {
            status,
            description,
        }
    }
}

#[async_trait::async_trait]
impl ContentProvider for SanityClient {
    async fn fetch(&self, query: &ContentQuery) -> pitchboard_core::Result<Value> {
        let started_at = Instant::now();

        tracing::trace!(
            target: TRACING_TARGET,
            query = query.name,
            "Sending Sanity query"
        );

        let result = self.execute(query).await;

        match &result {
            Ok(_) => tracing::debug!(
                target: TRACING_TARGET,
                query = query.name,
                elapsed_ms = started_at.elapsed().as_millis(),
                "Sanity query completed"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET,
                query = query.name,
                error = %error,
                elapsed_ms = started_at.elapsed().as_millis(),
                "Sanity query failed"
            ),
        }

        result.map_err(|e| pitchboard_core::Error::from(e).with_context(query.name))
    }

    async fn health_check(&self) -> pitchboard_core::Result<ServiceHealth> {
        let started_at = Instant::now();
        let probe = ContentQuery::new("ping", "now()");

        let health = match self.execute(&probe).await {
            Ok(_) => ServiceHealth::healthy(),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Sanity health probe failed"
                );
                ServiceHealth::unhealthy(error.to_string())
            }
        };

        Ok(health.with_response_time(started_at.elapsed()))
    }
}
