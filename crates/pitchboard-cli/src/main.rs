#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use pitchboard_server::handler::routes;
use pitchboard_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use pitchboard_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig};

pub const TRACING_TARGET_SERVER_STARTUP: &str = "pitchboard_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "pitchboard_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "pitchboard_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let state =
        ServiceState::from_config(&cli.service).context("failed to build the content client")?;
    server::serve(create_router(state, &cli.middleware), cli.server).await?;

    Ok(())
}

/// Routes wrapped, from the outside in, by recovery, observability and
/// security. `no-store` for `/startup` is part of the routes themselves.
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_state(state)
        .with_security(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
