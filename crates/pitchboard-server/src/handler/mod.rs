//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! | route                 | handler                              |
//! |-----------------------|--------------------------------------|
//! | `GET /`               | startup list and search              |
//! | `GET /startup/{id}`   | startup detail with editor's picks   |
//! | `GET /startup/{id}/views` | view counter                     |
//! | `GET /user/{id}`      | author profile                       |
//! | `GET /health`         | content store health                 |
//!
//! Every response under `/startup` is marked `Cache-Control: no-store`.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod request;
mod response;
mod startups;
mod users;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::{SearchParams, StartupPathParams, UserPathParams};
pub use crate::handler::response::{
    AuthorSummary, ErrorResponse, MonitorStatus, StartupCard, StartupDetail, StartupList,
    StartupViews, UserProfile,
};
use crate::middleware::RouterCacheControlExt;
use crate::service::ServiceState;

/// Path prefix of every response that must not be cached.
pub const NO_STORE_PREFIX: &str = "/startup";

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(startups::routes())
        .merge(users::routes())
        .merge(monitors::routes())
        .fallback(fallback)
        .with_no_store(NO_STORE_PREFIX)
}
