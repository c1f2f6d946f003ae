//! Plain HTTP serving.

use std::io;

use axum::Router;
use tokio::net::TcpListener;

use super::shutdown_signal;
use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;

pub async fn serve_http(app: Router, config: &ServerConfig) -> io::Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %listener.local_addr()?,
        "Listening for HTTP"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout()))
        .await
}
