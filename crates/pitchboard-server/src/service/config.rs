#[cfg(feature = "config")]
use clap::Args;
use pitchboard_core::provider::ContentService;
use pitchboard_core::{Error, Result};
use pitchboard_sanity::{SanityClient, SanityConfig};
use serde::{Deserialize, Serialize};

/// Default slug of the editor's picks playlist.
pub const DEFAULT_EDITOR_PICKS_SLUG: &str = "startup-of-the-day";

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Content store connection.
    #[cfg_attr(feature = "config", command(flatten))]
    pub sanity: SanityConfig,

    /// Slug of the playlist shown as editor's picks on startup pages
    #[cfg_attr(
        feature = "config",
        arg(long, env = "EDITOR_PICKS_SLUG", default_value = DEFAULT_EDITOR_PICKS_SLUG)
    )]
    #[serde(default = "default_editor_picks_slug")]
    pub editor_picks_slug: String,
}

fn default_editor_picks_slug() -> String {
    DEFAULT_EDITOR_PICKS_SLUG.to_owned()
}

impl ServiceConfig {
    /// Creates a configuration for the given content store.
    pub fn new(sanity: SanityConfig) -> Self {
        Self {
            sanity,
            editor_picks_slug: default_editor_picks_slug(),
        }
    }

    /// Validates the content store settings and the playlist slug.
    pub fn validate(&self) -> Result<()> {
        self.sanity.validate()?;

        if self.editor_picks_slug.trim().is_empty() {
            return Err(Error::configuration().with_message("Editor's picks slug cannot be empty"));
        }

        Ok(())
    }

    /// Creates the Sanity-backed content service.
    pub fn connect_content(&self) -> Result<ContentService> {
        let client = SanityClient::new(self.sanity.clone())?;
        Ok(client.into_service())
    }
}
