//! Content error to HTTP error conversion.

use pitchboard_core::{Error as ContentError, ErrorKind as ContentErrorKind};

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for content error conversions.
const TRACING_TARGET: &str = "pitchboard_server::handler::content";

impl From<ContentError> for HttpError<'static> {
    fn from(error: ContentError) -> Self {
        match error.kind {
            ContentErrorKind::MissingIdentifier | ContentErrorKind::NotFound => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Content lookup rejected"
                );
            }
            ContentErrorKind::RemoteFailure | ContentErrorKind::Timeout => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind,
                    "Content store request failed"
                );
            }
            _ => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind,
                    "Content operation failed"
                );
            }
        }

        let http_error = match error.kind {
            ContentErrorKind::MissingIdentifier => ErrorKind::MissingIdentifier.into_error(),
            ContentErrorKind::NotFound => ErrorKind::NotFound.into_error(),
            ContentErrorKind::RemoteFailure => ErrorKind::RemoteFailure.into_error(),
            ContentErrorKind::Timeout => ErrorKind::RemoteFailure
                .with_message("The content store did not respond in time"),
            ContentErrorKind::Serialization => ErrorKind::RemoteFailure
                .with_message("The content store returned an unexpected document"),
            ContentErrorKind::Configuration | ContentErrorKind::InternalError => {
                ErrorKind::InternalServerError.into_error()
            }
        };

        http_error.with_context(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    fn status_of(kind: ContentErrorKind) -> StatusCode {
        HttpError::from(ContentError::new(kind)).kind().status_code()
    }

    #[test]
    fn content_errors_map_to_status_codes() {
        assert_eq!(status_of(ContentErrorKind::MissingIdentifier), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ContentErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ContentErrorKind::RemoteFailure), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(ContentErrorKind::Timeout), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(ContentErrorKind::Serialization), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_of(ContentErrorKind::Configuration),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ContentErrorKind::InternalError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn context_keeps_original_error() {
        let error = ContentError::remote_failure().with_message("connection reset");
        let http_error = HttpError::from(error);
        assert_eq!(http_error.context(), Some("[remote_failure]: connection reset"));
    }
}
