//! Error types for the Sanity client.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for Sanity client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Sanity client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// The API answered with a non-success status.
    #[error("Sanity responded with {status}: {description}")]
    Status {
        status: StatusCode,
        description: String,
    },
}

impl From<Error> for pitchboard_core::Error {
    fn from(err: Error) -> Self {
        use pitchboard_core::Error as CoreError;

        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    CoreError::timeout()
                        .with_message("Sanity request timed out")
                        .with_source(e)
                } else if e.is_connect() {
                    CoreError::remote_failure()
                        .with_message("Connection to Sanity failed")
                        .with_source(e)
                } else if e.is_decode() {
                    CoreError::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    CoreError::remote_failure()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => CoreError::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => CoreError::configuration()
                .with_message("Invalid Sanity query URL")
                .with_source(e),
            // Missing documents come back as a `null` result, so a 404 means
            // the project, dataset or API version does not exist.
            Error::Status {
                status,
                description,
            } if status == StatusCode::NOT_FOUND => CoreError::remote_failure()
                .with_message(format!("Sanity endpoint not found: {description}"))
                .with_context(status.to_string()),
            Error::Status {
                status,
                description,
            } => CoreError::remote_failure()
                .with_message(description)
                .with_context(status.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pitchboard_core::ErrorKind;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let missing_dataset = Error::Status {
            status: StatusCode::NOT_FOUND,
            description: "Dataset not found".into(),
        };
        let error = pitchboard_core::Error::from(missing_dataset);
        assert_eq!(error.kind, ErrorKind::RemoteFailure);
        assert_eq!(
            error.message.as_deref(),
            Some("Sanity endpoint not found: Dataset not found")
        );

        let unavailable = Error::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            description: "Try again".into(),
        };
        let error = pitchboard_core::Error::from(unavailable);
        assert_eq!(error.kind, ErrorKind::RemoteFailure);
        assert_eq!(error.context.as_deref(), Some("503 Service Unavailable"));
    }

    #[test]
    fn test_serde_mapping() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = pitchboard_core::Error::from(Error::from(json_error));
        assert_eq!(error.kind, ErrorKind::Serialization);
    }
}
