//! The error every handler and extractor answers with.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use strum::{AsRefStr, Display};

use crate::handler::response::ErrorResponse;

/// Tracing target for error responses.
const TRACING_TARGET: &str = "pitchboard_server::handler::error";

/// What went wrong, as far as the client is concerned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The route needs a document id and got none.
    MissingIdentifier,
    BadRequest,
    NotFound,
    /// The content store failed, timed out or sent an unreadable document.
    RemoteFailure,
    #[default]
    InternalServerError,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::MissingIdentifier | Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::RemoteFailure => StatusCode::BAD_GATEWAY,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message used when the error carries none of its own.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::MissingIdentifier => "A document identifier is required.",
            Self::BadRequest => "The request is malformed.",
            Self::NotFound => "Nothing exists at this address.",
            Self::RemoteFailure => "The content store could not answer.",
            Self::InternalServerError => "Something went wrong on our side.",
        }
    }

    fn suggestion(self) -> Option<&'static str> {
        match self {
            Self::MissingIdentifier => Some("Add the id to the path, as in /startup/{id}"),
            Self::RemoteFailure => Some("Try again in a moment"),
            _ => None,
        }
    }

    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.into_error().into_response()
    }
}

/// A handler failure: a kind plus what the client and the logs should see.
///
/// `context` only reaches the logs.
#[derive(Debug, Default, Clone)]
#[must_use = "errors do nothing unless turned into a response"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
}

impl<'a> Error<'a> {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            resource: None,
            context: None,
        }
    }

    /// Replaces the kind's default message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    fn body(&self) -> ErrorResponse<'_> {
        ErrorResponse {
            name: self.kind.as_ref(),
            message: self.message().unwrap_or(self.kind.default_message()),
            resource: self.resource(),
            suggestion: self.kind.suggestion(),
        }
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.kind.status_code();
        write!(f, "{} ({status}): {}", self.kind, self.body().message)?;

        if let Some(resource) = self.resource() {
            write!(f, " [{resource}]")?;
        }
        if let Some(context) = self.context() {
            write!(f, " - {context}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if status.is_server_error() {
            tracing::error!(target: TRACING_TARGET, error = %self, "Request failed");
        } else {
            tracing::debug!(target: TRACING_TARGET, error = %self, "Request rejected");
        }

        (status, axum::Json(self.body())).into_response()
    }
}

/// [`Result`](std::result::Result) of a handler.
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;
