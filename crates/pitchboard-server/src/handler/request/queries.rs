use serde::Deserialize;
use validator::Validate;

/// Query parameters of the home page.
#[must_use]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchParams {
    /// Matched against title, category and author name.
    #[validate(length(max = 100))]
    pub query: Option<String>,
}

impl SearchParams {
    /// Returns the trimmed search term, `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }
}
