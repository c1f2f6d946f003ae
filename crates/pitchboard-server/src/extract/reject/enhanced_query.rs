use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "pitchboard_server::extract::query";

/// Query string extractor rejecting with a JSON [`Error`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        AxumQuery::<T>::from_request_parts(parts, state)
            .await
            .map(|AxumQuery(query)| Self(query))
            .map_err(Error::from)
    }
}

impl From<QueryRejection> for Error<'static> {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(target: TRACING_TARGET, %rejection, "Rejected query string");

        let detail = rejection.body_text();
        let message = match (quoted_name(&detail), query_problem(&detail)) {
            (Some(name), Some(problem)) => format!("Query parameter '{name}' is {problem}"),
            (None, Some(problem)) => format!("A query parameter is {problem}"),
            _ => "The query string could not be read".to_owned(),
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("query")
            .with_context(detail)
    }
}

/// Classifies a serde message by the words serde_urlencoded uses.
fn query_problem(detail: &str) -> Option<&'static str> {
    [
        ("missing field", "missing"),
        ("duplicate field", "repeated"),
        ("invalid type", "of the wrong type"),
        ("invalid value", "out of range"),
        ("invalid digit", "not a number"),
    ]
    .into_iter()
    .find_map(|(needle, problem)| detail.contains(needle).then_some(problem))
}

/// First backtick-quoted word of a serde message, usually the field.
fn quoted_name(detail: &str) -> Option<&str> {
    let (_, rest) = detail.split_once('`')?;
    let (name, _) = rest.split_once('`')?;
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::get;
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::Value;

    use super::*;

    #[derive(Deserialize)]
    struct Page {
        #[allow(dead_code)]
        limit: u32,
    }

    async fn page(Query(_): Query<Page>) -> &'static str {
        "ok"
    }

    #[test]
    fn quoted_name_reads_backticks() {
        assert_eq!(quoted_name("missing field `query`"), Some("query"));
        assert_eq!(quoted_name("missing field ``"), None);
        assert_eq!(quoted_name("something else"), None);
    }

    #[test]
    fn problems_are_classified() {
        assert_eq!(query_problem("missing field `limit`"), Some("missing"));
        assert_eq!(query_problem("duplicate field `limit`"), Some("repeated"));
        assert_eq!(query_problem("unexpected end of input"), None);
    }

    #[tokio::test]
    async fn missing_parameter_is_named() -> anyhow::Result<()> {
        let server = TestServer::new(Router::new().route("/", get(page)))?;

        let response = server.get("/").await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["name"], "bad_request");
        assert_eq!(body["resource"], "query");
        assert_eq!(body["message"], "Query parameter 'limit' is missing");
        Ok(())
    }
}
