//! Content store abstraction and its observable service wrapper.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::query::ContentQuery;
use crate::types::{Author, DocumentId, Playlist, Startup, StartupCard, StartupViews};
use crate::{Result, ServiceHealth, TRACING_TARGET_CONTENT};

/// Core trait for reading from a content store.
///
/// Implementations return the raw query result: a document, a list of
/// documents, or `null` when nothing matched.
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync {
    /// Executes a query and returns its result.
    async fn fetch(&self, query: &ContentQuery) -> Result<Value>;

    /// Performs a health check on the content store.
    async fn health_check(&self) -> Result<ServiceHealth>;
}

/// Content service wrapper with observability and typed lookups.
///
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct ContentService {
    inner: Arc<dyn ContentProvider>,
}

impl fmt::Debug for ContentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentService").finish_non_exhaustive()
    }
}

impl ContentService {
    /// Creates a new content service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: ContentProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Executes a query and returns the raw result.
    pub async fn fetch(&self, query: &ContentQuery) -> Result<Value> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_CONTENT,
            query = query.name,
            params = ?query.params,
            "Fetching content"
        );

        let result = self.inner.fetch(query).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(value) => {
                tracing::debug!(
                    target: TRACING_TARGET_CONTENT,
                    query = query.name,
                    is_null = value.is_null(),
                    elapsed_ms = elapsed.as_millis(),
                    "Content fetched"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_CONTENT,
                    query = query.name,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Content fetch failed"
                );
            }
        }

        result
    }

    /// Executes a query and deserializes its result; `null` becomes `None`.
    pub async fn fetch_as<T>(&self, query: &ContentQuery) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.fetch(query).await? {
            Value::Null => Ok(None),
            value => {
                let document = serde_json::from_value(value)
                    .map_err(|e| crate::Error::from(e).with_context(query.name))?;
                Ok(Some(document))
            }
        }
    }

    /// Lists startup cards, optionally filtered by a search term.
    pub async fn startups(&self, search: Option<&str>) -> Result<Vec<StartupCard>> {
        let query = ContentQuery::startups(search);
        Ok(self.fetch_as(&query).await?.unwrap_or_default())
    }

    /// Loads a full startup document.
    pub async fn startup_by_id(&self, id: &DocumentId) -> Result<Option<Startup>> {
        self.fetch_as(&ContentQuery::startup_by_id(id)).await
    }

    /// Loads the view counter of a startup.
    pub async fn startup_views(&self, id: &DocumentId) -> Result<Option<StartupViews>> {
        self.fetch_as(&ContentQuery::startup_views(id)).await
    }

    /// Loads an author profile.
    pub async fn author_by_id(&self, id: &DocumentId) -> Result<Option<Author>> {
        self.fetch_as(&ContentQuery::author_by_id(id)).await
    }

    /// Lists the startups written by an author.
    pub async fn startups_by_author(&self, id: &DocumentId) -> Result<Vec<StartupCard>> {
        let query = ContentQuery::startups_by_author(id);
        Ok(self.fetch_as(&query).await?.unwrap_or_default())
    }

    /// Loads a playlist by slug.
    pub async fn playlist_by_slug(&self, slug: &str) -> Result<Option<Playlist>> {
        self.fetch_as(&ContentQuery::playlist_by_slug(slug)).await
    }

    /// Performs a health check on the content store.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let started_at = Instant::now();
        let result = self.inner.health_check().await;

        tracing::debug!(
            target: TRACING_TARGET_CONTENT,
            healthy = result.as_ref().is_ok_and(ServiceHealth::is_available),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Content store health checked"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::mock::{MockProvider, MockResponse};

    fn startup_json(id: &str, title: &str) -> Value {
        json!({ "_id": id, "_createdAt": "2024-01-05T10:00:00Z", "title": title })
    }

    #[tokio::test]
    async fn test_null_result_is_none() {
        let service = MockProvider::new().into_service();
        let id = DocumentId::new("missing").unwrap();

        assert!(service.startup_by_id(&id).await.unwrap().is_none());
        assert!(service.startups(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_typed_lookup() {
        let id = DocumentId::new("abc").unwrap();
        let service = MockProvider::new()
            .with_response(
                ContentQuery::startup_by_id(&id),
                MockResponse::value(startup_json("abc", "Mechanic")),
            )
            .into_service();

        let startup = service.startup_by_id(&id).await.unwrap().unwrap();
        assert_eq!(startup.card.title.as_deref(), Some("Mechanic"));
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let id = DocumentId::new("abc").unwrap();
        let service = MockProvider::new()
            .with_response(
                ContentQuery::author_by_id(&id),
                MockResponse::value(json!({ "name": "no id" })),
            )
            .into_service();

        let error = service.author_by_id(&id).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Serialization);
        assert_eq!(error.context.as_deref(), Some("author_by_id"));
    }
}
