//! Documents read from the content store.
//!
//! Field names follow the store's projections (`_id`, `_createdAt`, ...).
//! Every field except the identifier is optional, since editors may leave
//! any of them blank.

mod author;
mod playlist;
mod startup;

use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

pub use self::author::Author;
pub use self::playlist::Playlist;
pub use self::startup::{Startup, StartupCard, StartupViews};
use crate::{Error, Result};

/// Identifier of a document in the content store.
///
/// Guaranteed non-blank once constructed through [`DocumentId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, Deref, Display)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates an identifier, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::missing_identifier());
        }

        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = Error;

    fn try_from(id: String) -> Result<Self> {
        Self::new(id)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// URL-friendly name of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    /// Current slug value.
    pub current: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_document_id_rejects_blank() {
        assert_eq!(DocumentId::new("").unwrap_err().kind, ErrorKind::MissingIdentifier);
        assert_eq!(DocumentId::new("  ").unwrap_err().kind, ErrorKind::MissingIdentifier);
    }

    #[test]
    fn test_document_id_keeps_value() {
        let id = DocumentId::new("abc").unwrap();
        assert_eq!(id.as_str(), "abc");
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn test_document_id_serde() {
        let id: DocumentId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        assert!(serde_json::from_str::<DocumentId>("\"\"").is_err());
    }
}
