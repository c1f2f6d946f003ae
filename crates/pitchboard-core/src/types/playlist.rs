use serde::{Deserialize, Serialize};

use super::{DocumentId, Slug, StartupCard};

/// Curated, ordered selection of startups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub select: Option<Vec<StartupCard>>,
}

impl Playlist {
    /// Consumes the playlist, returning its selection (empty when unset).
    pub fn into_selection(self) -> Vec<StartupCard> {
        self.select.unwrap_or_default()
    }
}
