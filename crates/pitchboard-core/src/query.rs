//! Named GROQ queries and their parameters.

use std::fmt;

use serde_json::{Map, Value};

use crate::types::DocumentId;

/// GROQ sources of every query the application issues.
pub mod groq {
    /// Startup cards, newest first, optionally filtered by `$search`.
    pub const STARTUPS: &str = r#"*[_type == "startup" && defined(slug.current) && (!defined($search) || title match $search || category match $search || author->name match $search)] | order(_createdAt desc) {
  _id, title, slug, _createdAt,
  author -> { _id, name, image, bio },
  views, description, category, image
}"#;

    /// Full startup document by `$id`.
    pub const STARTUP_BY_ID: &str = r#"*[_type == "startup" && _id == $id][0] {
  _id, title, slug, _createdAt,
  author -> { _id, name, username, image, bio },
  views, description, category, image, pitch
}"#;

    /// View counter of the startup `$id`.
    pub const STARTUP_VIEWS: &str = r#"*[_type == "startup" && _id == $id][0] { _id, views }"#;

    /// Author profile by `$id`.
    pub const AUTHOR_BY_ID: &str = r#"*[_type == "author" && _id == $id][0] {
  _id, name, username, email, image, bio
}"#;

    /// Startup cards written by the author `$id`, newest first.
    pub const STARTUPS_BY_AUTHOR: &str = r#"*[_type == "startup" && author._ref == $id] | order(_createdAt desc) {
  _id, title, slug, _createdAt,
  author -> { _id, name, image, bio },
  views, description, category, image
}"#;

    /// Playlist by `$slug`, with its selection dereferenced.
    pub const PLAYLIST_BY_SLUG: &str = r#"*[_type == "playlist" && slug.current == $slug][0] {
  _id, title, slug,
  select[] -> {
    _id, _createdAt, title, slug,
    author -> { _id, name, image, bio },
    views, description, category, image
  }
}"#;
}

/// A query sent to the content store: a stable name (used in logs and by
/// test doubles), its GROQ source and named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentQuery {
    pub name: &'static str,
    pub groq: &'static str,
    pub params: Map<String, Value>,
}

impl ContentQuery {
    /// Creates a query without parameters.
    pub fn new(name: &'static str, groq: &'static str) -> Self {
        Self {
            name,
            groq,
            params: Map::new(),
        }
    }

    /// Binds a named parameter (referenced in GROQ as `$name`).
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Startup cards; `search` of `None` (or blank) lists everything.
    pub fn startups(search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_owned()))
            .unwrap_or(Value::Null);

        Self::new("startups", groq::STARTUPS).with_param("search", search)
    }

    pub fn startup_by_id(id: &DocumentId) -> Self {
        Self::new("startup_by_id", groq::STARTUP_BY_ID).with_param("id", id.as_str())
    }

    pub fn startup_views(id: &DocumentId) -> Self {
        Self::new("startup_views", groq::STARTUP_VIEWS).with_param("id", id.as_str())
    }

    pub fn author_by_id(id: &DocumentId) -> Self {
        Self::new("author_by_id", groq::AUTHOR_BY_ID).with_param("id", id.as_str())
    }

    pub fn startups_by_author(id: &DocumentId) -> Self {
        Self::new("startups_by_author", groq::STARTUPS_BY_AUTHOR).with_param("id", id.as_str())
    }

    pub fn playlist_by_slug(slug: &str) -> Self {
        Self::new("playlist_by_slug", groq::PLAYLIST_BY_SLUG).with_param("slug", slug)
    }

    /// Stable textual identity of this query, e.g. `startup_by_id {"id":"abc"}`.
    ///
    /// Parameters are ordered by name, so equal queries yield equal keys.
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, Value::Object(self.params.clone()))
    }
}
