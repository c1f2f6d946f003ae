//! The error shared by the content client, the fetch cache and the server.
//!
//! [`Error`] is `Clone` because a memoized lookup hands the same failure to
//! every caller that joined it.

use std::sync::Arc;

use hipstr::HipStr;
use strum::{AsRefStr, Display};

/// Result of a content operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why a content operation failed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A lookup key lacked its document id or slug.
    MissingIdentifier,
    /// The content store reported the document as absent.
    NotFound,
    /// The content store could not be reached or answered with an error.
    RemoteFailure,
    /// The content store did not answer within the client timeout.
    Timeout,
    /// A document did not have the expected shape.
    Serialization,
    /// The client was configured with unusable values.
    Configuration,
    #[default]
    InternalError,
}

/// A classified failure with an optional message, context and cause.
#[must_use]
#[derive(Debug, Clone, thiserror::Error)]
#[error("[{kind}]{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    pub kind: ErrorKind,
    /// Shown to operators and, for client errors, to API consumers.
    pub message: Option<HipStr<'static>>,
    /// Where the failure happened, e.g. the query name.
    pub context: Option<HipStr<'static>>,
    #[source]
    pub source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            context: None,
            source: None,
        }
    }

    pub fn from_source(
        kind: ErrorKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::new(kind).with_source(source)
    }

    pub fn missing_identifier() -> Self {
        Self::new(ErrorKind::MissingIdentifier).with_message("An identifier is required")
    }

    pub fn remote_failure() -> Self {
        Self::new(ErrorKind::RemoteFailure)
    }

    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    pub fn internal_error() -> Self {
        Self::new(ErrorKind::InternalError)
    }

    pub fn with_message(mut self, message: impl Into<HipStr<'static>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<HipStr<'static>>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        self.source = Some(Arc::from(source.into()));
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error)
            .with_message("Failed to decode content store document")
    }
}
