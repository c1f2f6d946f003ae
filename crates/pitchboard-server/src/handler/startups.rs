//! Home, startup detail and view counter handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pitchboard_core::provider::ContentService;
use pitchboard_core::types::DocumentId;

use crate::extract::{Path, ValidateQuery};
use crate::handler::request::{SearchParams, StartupPathParams};
use crate::handler::response::{StartupDetail, StartupList, StartupViews};
use crate::handler::{ErrorKind, Result};
use crate::service::{DetailLoader, DetailOutcome, EditorPicksSlug, RenderPass, ServiceState};

/// Tracing target for startup operations.
const TRACING_TARGET: &str = "pitchboard_server::handler::startups";

/// Lists all startups, or those matching the search query, newest first.
#[tracing::instrument(skip_all)]
async fn list_startups(
    State(content): State<ContentService>,
    ValidateQuery(params): ValidateQuery<SearchParams>,
) -> Result<(StatusCode, Json<StartupList>)> {
    let search = params.search_term();

    tracing::debug!(
        target: TRACING_TARGET,
        search = ?search,
        "Listing startups"
    );

    let startups = content.startups(search).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = startups.len(),
        "Startups listed"
    );

    Ok((StatusCode::OK, Json(StartupList::new(search, startups))))
}

/// Loads a startup together with the editor's picks.
#[tracing::instrument(skip_all, fields(pass_id = %pass.id()))]
async fn read_startup(
    State(editor_picks): State<EditorPicksSlug>,
    pass: RenderPass,
    path: Option<Path<StartupPathParams>>,
) -> Result<(StatusCode, Json<StartupDetail>)> {
    let id = path.map(|Path(params)| params.id).unwrap_or_default();

    let mut loader = DetailLoader::new(&pass, editor_picks.as_str());
    let outcome = loader.load(&id).await?;

    match outcome {
        DetailOutcome::Found(view) => {
            tracing::debug!(
                target: TRACING_TARGET,
                startup_id = %id,
                editor_picks = view.editor_picks.len(),
                "Startup loaded"
            );

            Ok((StatusCode::OK, Json(StartupDetail::from(*view))))
        }
        DetailOutcome::NotFound => {
            tracing::debug!(
                target: TRACING_TARGET,
                startup_id = %id,
                "Startup not found"
            );

            Err(ErrorKind::NotFound
                .with_message("Startup not found")
                .with_resource("startup")
                .with_context(format!("startup id: {id}")))
        }
    }
}

/// Returns the view counter of a startup.
#[tracing::instrument(skip_all)]
async fn read_startup_views(
    State(content): State<ContentService>,
    Path(params): Path<StartupPathParams>,
) -> Result<(StatusCode, Json<StartupViews>)> {
    let id = DocumentId::new(params.id)?;

    let Some(views) = content.startup_views(&id).await? else {
        return Err(ErrorKind::NotFound
            .with_message("Startup not found")
            .with_resource("startup")
            .with_context(format!("startup id: {id}")));
    };

    Ok((StatusCode::OK, Json(StartupViews::new(id, views))))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/", get(list_startups))
        .route("/startup/", get(read_startup))
        .route("/startup/{id}", get(read_startup))
        .route("/startup/{id}/views", get(read_startup_views))
}
