//! `Cache-Control: no-store` for routes whose responses must never be reused.

use axum::Router;
use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

/// Extension trait for `axum::`[`Router`] to disable response caching.
pub trait RouterCacheControlExt<S> {
    /// Marks every response under `prefix` as `no-store`, including errors
    /// and fallback responses.
    fn with_no_store(self, prefix: &'static str) -> Self;
}

impl<S> RouterCacheControlExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_no_store(self, prefix: &'static str) -> Self {
        self.layer(from_fn_with_state(prefix, no_store))
    }
}

async fn no_store(State(prefix): State<&'static str>, request: Request, next: Next) -> Response {
    let applies = is_under(request.uri().path(), prefix);
    let mut response = next.run(request).await;

    if applies {
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    response
}

/// Returns `true` when `path` is `prefix` or one of its sub-paths.
fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching() {
        assert!(is_under("/startup", "/startup"));
        assert!(is_under("/startup/", "/startup"));
        assert!(is_under("/startup/abc/views", "/startup"));
        assert!(!is_under("/startups", "/startup"));
        assert!(!is_under("/", "/startup"));
    }
}
