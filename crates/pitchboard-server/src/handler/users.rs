//! User profile handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pitchboard_core::provider::ContentService;

use crate::extract::Path;
use crate::handler::request::UserPathParams;
use crate::handler::response::UserProfile;
use crate::handler::{ErrorKind, Result};
use crate::service::{RenderPass, ServiceState};

/// Tracing target for user operations.
const TRACING_TARGET: &str = "pitchboard_server::handler::users";

/// Returns an author with their startups, newest first.
#[tracing::instrument(skip_all, fields(pass_id = %pass.id()))]
async fn read_user(
    State(content): State<ContentService>,
    pass: RenderPass,
    Path(params): Path<UserPathParams>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let Some(author) = Option::clone(&*pass.author(&params.id).await?) else {
        tracing::debug!(
            target: TRACING_TARGET,
            author_id = %params.id,
            "Author not found"
        );

        return Err(ErrorKind::NotFound
            .with_message("User not found")
            .with_resource("user")
            .with_context(format!("author id: {}", params.id)));
    };

    let startups = content.startups_by_author(&author.id).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        author_id = %author.id,
        startups = startups.len(),
        "User profile loaded"
    );

    Ok((StatusCode::OK, Json(UserProfile::new(author, startups))))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/user/{id}", get(read_user))
}
