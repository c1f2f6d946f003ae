//! Listening address, shutdown and TLS settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::ensure;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Longest accepted drain period on shutdown, in seconds.
const MAX_SHUTDOWN_TIMEOUT: u64 = 300;

/// Where the API listens and how long it drains on shutdown.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Address to listen on; `0.0.0.0` exposes the API on every interface.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on, unprivileged ports only.
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seconds in-flight requests may take to finish after a shutdown signal.
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,

    /// PEM certificate chain; serving switches to HTTPS when set with a key.
    #[cfg(feature = "tls")]
    #[arg(long, env = "TLS_CERT_PATH", requires = "tls_key_path")]
    pub tls_cert_path: Option<std::path::PathBuf>,

    /// PEM private key matching `tls_cert_path`.
    #[cfg(feature = "tls")]
    #[arg(long, env = "TLS_KEY_PATH", requires = "tls_cert_path")]
    pub tls_key_path: Option<std::path::PathBuf>,
}

impl ServerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.port >= 1024,
            "port {} needs root privileges, pick one from 1024 upwards",
            self.port
        );
        ensure!(
            (1..=MAX_SHUTDOWN_TIMEOUT).contains(&self.shutdown_timeout),
            "shutdown timeout must be 1 to {MAX_SHUTDOWN_TIMEOUT} seconds, got {}",
            self.shutdown_timeout
        );

        #[cfg(feature = "tls")]
        ensure!(
            self.tls_cert_path.is_some() == self.tls_key_path.is_some(),
            "TLS needs both a certificate and a private key"
        );

        Ok(())
    }

    #[inline]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[inline]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Certificate and key paths, when both are configured.
    #[cfg(feature = "tls")]
    pub fn tls_files(&self) -> Option<(&std::path::Path, &std::path::Path)> {
        Some((self.tls_cert_path.as_deref()?, self.tls_key_path.as_deref()?))
    }

    pub fn log(&self) {
        #[cfg(feature = "tls")]
        let https = self.tls_files().is_some();
        #[cfg(not(feature = "tls"))]
        let https = false;

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.addr(),
            https,
            shutdown_timeout_secs = self.shutdown_timeout,
            "Listener configuration"
        );

        if self.host.is_unspecified() {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                host = %self.host,
                "Listening on every network interface"
            );
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            shutdown_timeout: 30,
            #[cfg(feature = "tls")]
            tls_cert_path: None,
            #[cfg(feature = "tls")]
            tls_key_path: None,
        }
    }
}
