//! Serving the router until a shutdown signal.

mod http_server;
#[cfg(feature = "tls")]
mod https_server;
mod shutdown;

use std::io;
use std::time::Instant;

use axum::Router;

use self::shutdown::shutdown_signal;
use crate::TRACING_TARGET_SERVER_SHUTDOWN;
use crate::config::ServerConfig;

/// Serves `app` over HTTPS when a certificate and key are configured,
/// otherwise over plain HTTP, and reports how the server stopped.
pub async fn serve(app: Router, config: ServerConfig) -> io::Result<()> {
    let started_at = Instant::now();
    let result = serve_until_shutdown(app, config).await;
    let uptime_secs = started_at.elapsed().as_secs();

    match &result {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            uptime_secs,
            "Server stopped"
        ),
        Err(error) => tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            %error,
            uptime_secs,
            hint = hint(error),
            "Server failed"
        ),
    }

    result
}

async fn serve_until_shutdown(app: Router, config: ServerConfig) -> io::Result<()> {
    #[cfg(feature = "tls")]
    {
        if let Some((cert, key)) = config.tls_files() {
            return https_server::serve_https(app, &config, cert, key).await;
        }
    }

    http_server::serve_http(app, &config).await
}

/// Operator hint for the IO errors a misconfigured listener produces.
fn hint(error: &io::Error) -> Option<&'static str> {
    let hint = match error.kind() {
        io::ErrorKind::AddrInUse => "another process holds the port, set PORT to a free one",
        io::ErrorKind::AddrNotAvailable => "HOST is not an address of this machine",
        io::ErrorKind::PermissionDenied => "the process may not bind this address",
        io::ErrorKind::NotFound => "TLS_CERT_PATH or TLS_KEY_PATH does not exist",
        io::ErrorKind::InvalidData => "the TLS files are not PEM encoded",
        _ => return None,
    };

    Some(hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_for_listener_errors() {
        let in_use = io::Error::new(io::ErrorKind::AddrInUse, "in use");
        assert!(hint(&in_use).is_some_and(|hint| hint.contains("PORT")));
        assert_eq!(hint(&io::Error::other("unexpected")), None);
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            port: taken.local_addr().unwrap().port(),
            ..ServerConfig::default()
        };

        let error = serve(Router::new(), config).await.unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::AddrInUse);
    }
}
