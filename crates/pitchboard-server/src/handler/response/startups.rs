//! Startup response types.

use jiff::Timestamp;
use pitchboard_core::format::{format_date, format_views, render_markdown};
use pitchboard_core::types;
use serde::Serialize;

use crate::service::DetailView;

/// Heading of the editor's picks section on the detail page.
pub const EDITOR_PICKS_HEADING: &str = "Startup of the Day";

/// Shown in place of a pitch that is absent or blank.
pub const EMPTY_PITCH_NOTICE: &str = "No details provided";

/// Author as embedded in startup cards.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub image: Option<String>,
}

impl From<types::Author> for AuthorSummary {
    fn from(author: types::Author) -> Self {
        Self {
            id: author.id.into(),
            name: author.name,
            username: author.username,
            image: author.image,
        }
    }
}

/// A startup as shown in lists.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupCard {
    pub id: String,
    pub created_at: Timestamp,
    /// Creation date, e.g. `January 5, 2024`.
    pub created_at_label: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub author: Option<AuthorSummary>,
    pub views: u64,
    /// Compact view counter, e.g. `1.5K views`.
    pub views_label: String,
}

impl From<types::StartupCard> for StartupCard {
    fn from(card: types::StartupCard) -> Self {
        Self {
            id: card.id.into(),
            created_at: card.created_at,
            created_at_label: format_date(card.created_at),
            title: card.title,
            slug: card.slug.map(|slug| slug.current),
            description: card.description,
            category: card.category,
            image: card.image,
            author: card.author.map(AuthorSummary::from),
            views: card.views.unwrap_or_default(),
            views_label: format_views(card.views),
        }
    }
}

/// Home page: all startups or search results.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupList {
    pub heading: String,
    pub query: Option<String>,
    pub startups: Vec<StartupCard>,
}

impl StartupList {
    pub fn new(query: Option<&str>, startups: Vec<types::StartupCard>) -> Self {
        let heading = match query {
            Some(query) => format!("Search results for \"{query}\""),
            None => "All Startups".to_owned(),
        };

        Self {
            heading,
            query: query.map(str::to_owned),
            startups: startups.into_iter().map(StartupCard::from).collect(),
        }
    }
}

/// Detail page.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupDetail {
    #[serde(flatten)]
    pub startup: StartupCard,
    /// Markdown source of the pitch.
    pub pitch: Option<String>,
    /// The pitch rendered to HTML, absent when there is nothing to render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_html: Option<String>,
    /// Set instead of `pitch_html` when the pitch is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_notice: Option<&'static str>,
    /// Present only when there are editor's picks to show.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor_picks_heading: Option<&'static str>,
    pub editor_picks: Vec<StartupCard>,
}

impl From<DetailView> for StartupDetail {
    fn from(view: DetailView) -> Self {
        let editor_picks: Vec<StartupCard> = view
            .editor_picks
            .into_iter()
            .map(StartupCard::from)
            .collect();

        let pitch_html = render_markdown(view.startup.pitch.as_deref());

        Self {
            startup: view.startup.card.into(),
            pitch_notice: pitch_html.is_none().then_some(EMPTY_PITCH_NOTICE),
            pitch_html,
            pitch: view.startup.pitch,
            editor_picks_heading: (!editor_picks.is_empty()).then_some(EDITOR_PICKS_HEADING),
            editor_picks,
        }
    }
}

/// View counter of one startup.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupViews {
    pub id: String,
    pub views: u64,
    pub label: String,
}

impl StartupViews {
    pub fn new(id: impl Into<String>, views: types::StartupViews) -> Self {
        Self {
            id: id.into(),
            views: views.views.unwrap_or_default(),
            label: format_views(views.views),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn card(id: &str) -> types::StartupCard {
        serde_json::from_value(json!({
            "_id": id,
            "_createdAt": "2024-01-05T10:00:00Z",
            "title": "Mechanic",
            "slug": { "current": "mechanic" },
            "views": 1500,
        }))
        .unwrap()
    }

    #[test]
    fn card_formats_date_and_views() {
        let card = StartupCard::from(card("abc"));
        assert_eq!(card.created_at_label, "January 5, 2024");
        assert_eq!(card.views_label, "1.5K views");
        assert_eq!(card.slug.as_deref(), Some("mechanic"));
    }

    #[test]
    fn list_heading() {
        assert_eq!(StartupList::new(None, Vec::new()).heading, "All Startups");
        assert_eq!(
            StartupList::new(Some("tech"), Vec::new()).heading,
            "Search results for \"tech\""
        );
    }

    #[test]
    fn detail_hides_heading_without_picks() {
        let startup = types::Startup {
            card: card("abc"),
            pitch: Some("pitch".to_owned()),
        };

        let empty = StartupDetail::from(DetailView {
            startup: startup.clone(),
            editor_picks: Vec::new(),
        });
        let body = serde_json::to_value(&empty).unwrap();
        assert!(body.get("editorPicksHeading").is_none());
        assert_eq!(body["editorPicks"], json!([]));
        assert_eq!(body["id"], "abc");

        let full = StartupDetail::from(DetailView {
            startup,
            editor_picks: vec![card("post2")],
        });
        assert_eq!(full.editor_picks_heading, Some(EDITOR_PICKS_HEADING));
    }

    #[test]
    fn detail_renders_pitch() {
        let detail = |pitch: Option<&str>| {
            StartupDetail::from(DetailView {
                startup: types::Startup {
                    card: card("abc"),
                    pitch: pitch.map(str::to_owned),
                },
                editor_picks: Vec::new(),
            })
        };

        let rendered = detail(Some("*fast* repairs"));
        assert_eq!(
            rendered.pitch_html.as_deref(),
            Some("<p><em>fast</em> repairs</p>\n")
        );
        assert_eq!(rendered.pitch_notice, None);

        for empty in [None, Some(""), Some("   ")] {
            let detail = detail(empty);
            assert_eq!(detail.pitch_html, None);
            assert_eq!(detail.pitch_notice, Some(EMPTY_PITCH_NOTICE));
        }
    }
}
