use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, OptionalFromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Route parameters, rejected as a JSON [`Error`].
///
/// Extracted as `Option<Path<T>>`, a route without parameters (such as
/// `/startup/`) yields `None`. A parameter that is present but cannot be
/// decoded is still rejected as a bad request.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(params) =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await?;
        Ok(Self(params))
    }
}

impl<T, S> OptionalFromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <AxumPath<T> as OptionalFromRequestParts<S>>::from_request_parts(parts, state).await
        {
            Ok(params) => Ok(params.map(|AxumPath(params)| Self(params))),
            Err(PathRejection::MissingPathParams(_)) => Ok(None),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => ErrorKind::BadRequest
                .with_message("The path contains an undecodable identifier")
                .with_resource("path")
                .with_context(first_line(&err.body_text())),
            PathRejection::MissingPathParams(err) => ErrorKind::MissingIdentifier
                .with_resource("path")
                .with_context(first_line(&err.body_text())),
            rejection => ErrorKind::InternalServerError.with_context(rejection.body_text()),
        }
    }
}

/// First line of a rejection body, capped at 120 characters for the logs.
fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().chars().take(120).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_is_capped() {
        assert_eq!(first_line(&"x".repeat(500)).len(), 120);
        assert_eq!(first_line("bad id\nat offset 3"), "bad id");
        assert_eq!(first_line(""), "");
    }
}
