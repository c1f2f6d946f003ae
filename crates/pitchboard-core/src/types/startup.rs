use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Author, DocumentId, Slug};

/// Startup projection used in lists: everything except the pitch body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupCard {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(rename = "_createdAt")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub views: Option<u64>,
}

/// Full startup document, as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Startup {
    #[serde(flatten)]
    pub card: StartupCard,
    /// Markdown pitch body.
    #[serde(default)]
    pub pitch: Option<String>,
}

/// View counter of a single startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupViews {
    #[serde(default)]
    pub views: Option<u64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_startup_projection() {
        let value = json!({
            "_id": "abc",
            "_createdAt": "2024-01-05T10:00:00Z",
            "title": "Mechanic",
            "slug": { "current": "mechanic" },
            "author": { "_id": "author-1", "name": "Jane", "username": "jane" },
            "views": 42,
            "pitch": "# Hello",
        });

        let startup: Startup = serde_json::from_value(value).unwrap();
        assert_eq!(startup.card.id.as_str(), "abc");
        assert_eq!(startup.card.title.as_deref(), Some("Mechanic"));
        assert_eq!(startup.card.views, Some(42));
        assert_eq!(startup.pitch.as_deref(), Some("# Hello"));
        assert_eq!(
            startup.card.author.and_then(|a| a.username).as_deref(),
            Some("jane")
        );
    }

    #[test]
    fn test_missing_optional_fields() {
        let value = json!({ "_id": "abc", "_createdAt": "2024-01-05T10:00:00Z" });

        let card: StartupCard = serde_json::from_value(value).unwrap();
        assert!(card.title.is_none());
        assert!(card.author.is_none());
        assert!(card.views.is_none());
    }
}
