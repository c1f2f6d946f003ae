//! Per-request render pass.

use std::fmt;

use pitchboard_core::cache::{FetchCache, PendingFetch};
use pitchboard_core::provider::ContentService;
use pitchboard_core::types::{Author, DocumentId, Playlist, Startup};
use uuid::Uuid;

/// Tracing target for render passes.
pub(crate) const TRACING_TARGET: &str = "pitchboard_server::service::render";

/// The memoized lookups of one request.
///
/// A pass is created for every incoming request and dropped with it, so
/// lookups are shared within a request and never across requests.
pub struct RenderPass {
    id: Uuid,
    content: ContentService,
    startups: FetchCache<String, Option<Startup>>,
    playlists: FetchCache<String, Option<Playlist>>,
    authors: FetchCache<String, Option<Author>>,
}

impl fmt::Debug for RenderPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPass")
            .field("id", &self.id)
            .field("startups", &self.startups)
            .field("playlists", &self.playlists)
            .field("authors", &self.authors)
            .finish_non_exhaustive()
    }
}

impl RenderPass {
    /// Starts a new pass with empty caches.
    pub fn new(content: ContentService) -> Self {
        let id = Uuid::now_v7();

        let startups = {
            let content = content.clone();
            FetchCache::new("startup_by_id", move |id: String| {
                let content = content.clone();
                async move { content.startup_by_id(&DocumentId::new(id)?).await }
            })
        };

        let playlists = {
            let content = content.clone();
            FetchCache::new("playlist_by_slug", move |slug: String| {
                let content = content.clone();
                async move { content.playlist_by_slug(&slug).await }
            })
        };

        let authors = {
            let content = content.clone();
            FetchCache::new("author_by_id", move |id: String| {
                let content = content.clone();
                async move { content.author_by_id(&DocumentId::new(id)?).await }
            })
        };

        tracing::trace!(target: TRACING_TARGET, pass_id = %id, "Render pass started");

        Self {
            id,
            content,
            startups,
            playlists,
            authors,
        }
    }

    /// Identifier of this pass, for log correlation.
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Uncached access to the content store.
    #[inline]
    pub fn content(&self) -> &ContentService {
        &self.content
    }

    /// Issues (or joins) the lookup of a full startup document.
    pub fn startup(&self, id: &str) -> PendingFetch<Option<Startup>> {
        self.startups.get_or_fetch(id.to_owned())
    }

    /// Issues (or joins) the lookup of a playlist.
    pub fn playlist(&self, slug: &str) -> PendingFetch<Option<Playlist>> {
        self.playlists.get_or_fetch(slug.to_owned())
    }

    /// Issues (or joins) the lookup of an author.
    pub fn author(&self, id: &str) -> PendingFetch<Option<Author>> {
        self.authors.get_or_fetch(id.to_owned())
    }

    pub fn startups(&self) -> &FetchCache<String, Option<Startup>> {
        &self.startups
    }

    pub fn playlists(&self) -> &FetchCache<String, Option<Playlist>> {
        &self.playlists
    }

    pub fn authors(&self) -> &FetchCache<String, Option<Author>> {
        &self.authors
    }
}

impl Drop for RenderPass {
    fn drop(&mut self) {
        tracing::trace!(
            target: TRACING_TARGET,
            pass_id = %self.id,
            startups = self.startups.len(),
            playlists = self.playlists.len(),
            authors = self.authors.len(),
            "Render pass finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pitchboard_core::mock::{MockProvider, MockResponse};
    use pitchboard_core::query::ContentQuery;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn lookups_are_shared_within_a_pass() {
        let id = DocumentId::new("abc").unwrap();
        let provider = MockProvider::new().with_response(
            ContentQuery::author_by_id(&id),
            MockResponse::value(json!({ "_id": "abc", "name": "Jane" })),
        );
        let pass = RenderPass::new(provider.clone().into_service());

        let first = pass.author("abc").await.unwrap();
        let second = pass.author("abc").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.call_count("author_by_id"), 1);
    }

    #[tokio::test]
    async fn passes_do_not_share_lookups() {
        let provider = MockProvider::new();
        let service = provider.clone().into_service();

        RenderPass::new(service.clone()).startup("abc").await.unwrap();
        RenderPass::new(service).startup("abc").await.unwrap();

        assert_eq!(provider.call_count("startup_by_id"), 2);
    }

    #[tokio::test]
    async fn pass_ids_are_unique() {
        let service = MockProvider::new().into_service();
        assert_ne!(
            RenderPass::new(service.clone()).id(),
            RenderPass::new(service).id()
        );
    }
}
