//! User profile response types.

use pitchboard_core::types;
use serde::Serialize;

use super::StartupCard;

/// Profile page: the author and their startups, newest first.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub startups: Vec<StartupCard>,
}

impl UserProfile {
    pub fn new(author: types::Author, startups: Vec<types::StartupCard>) -> Self {
        Self {
            id: author.id.into(),
            name: author.name,
            username: author.username,
            email: author.email,
            image: author.image,
            bio: author.bio,
            startups: startups.into_iter().map(StartupCard::from).collect(),
        }
    }
}
