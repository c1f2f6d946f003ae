//! HTTPS serving with rustls.

use std::io;
use std::path::Path;

use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;

use super::shutdown_signal;
use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;

/// Serves `app` over TLS. After a shutdown signal, open connections get the
/// shutdown timeout to finish.
pub async fn serve_https(
    app: Router,
    config: &ServerConfig,
    cert: &Path,
    key: &Path,
) -> io::Result<()> {
    let tls = load_tls(cert, key).await?;
    let addr = config.addr();
    let drain = config.shutdown_timeout();

    let handle = Handle::new();
    tokio::spawn({
        let handle = handle.clone();
        async move {
            shutdown_signal(drain).await;
            handle.graceful_shutdown(Some(drain));
        }
    });

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        %addr,
        cert = %cert.display(),
        "Listening for HTTPS"
    );

    axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
}

/// Reads the PEM certificate chain and key, naming the file that failed.
async fn load_tls(cert: &Path, key: &Path) -> io::Result<RustlsConfig> {
    for path in [cert, key] {
        tokio::fs::metadata(path).await.map_err(|error| {
            io::Error::new(error.kind(), format!("{}: {error}", path.display()))
        })?;
    }

    RustlsConfig::from_pem_file(cert, key)
        .await
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
}
