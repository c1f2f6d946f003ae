//! Application state and dependency injection.

mod config;
mod detail;
mod health;
mod render;

use std::sync::Arc;

use pitchboard_core::Result;
use pitchboard_core::provider::ContentService;

pub use crate::service::config::{DEFAULT_EDITOR_PICKS_SLUG, ServiceConfig};
pub use crate::service::detail::{DetailLoader, DetailOutcome, DetailState, DetailView};
pub use crate::service::health::HealthCache;
pub use crate::service::render::RenderPass;
pub(crate) use crate::service::render::TRACING_TARGET as TRACING_TARGET_RENDER;

/// Slug of the playlist shown as editor's picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorPicksSlug(Arc<str>);

impl EditorPicksSlug {
    pub fn new(slug: impl AsRef<str>) -> Self {
        Self(Arc::from(slug.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EditorPicksSlug {
    fn default() -> Self {
        Self::new(DEFAULT_EDITOR_PICKS_SLUG)
    }
}

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub content: ContentService,

    // Internal services:
    pub health_cache: HealthCache,
    pub editor_picks: EditorPicksSlug,
}

impl ServiceState {
    /// Creates state around an existing content service.
    pub fn new(content: ContentService, editor_picks: EditorPicksSlug) -> Self {
        Self {
            content,
            health_cache: HealthCache::new(),
            editor_picks,
        }
    }

    /// Initializes application state from configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let content = config.connect_content()?;
        let editor_picks = EditorPicksSlug::new(&config.editor_picks_slug);
        Ok(Self::new(content, editor_picks))
    }

    /// Starts a fresh render pass for one request.
    pub fn render_pass(&self) -> RenderPass {
        RenderPass::new(self.content.clone())
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(content: ContentService);

// Internal services:
impl_di!(health_cache: HealthCache);
impl_di!(editor_picks: EditorPicksSlug);
