//! Router extensions layering the HTTP middleware.
//!
//! Apply in this order, outermost last:
//!
//! ```rust,no_run
//! use pitchboard_server::handler::routes;
//! use pitchboard_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt,
//!     RouterSecurityExt,
//! };
//! # fn app(state: pitchboard_server::service::ServiceState) -> axum::Router {
//! routes()
//!     .with_state(state)
//!     .with_security(&CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default())
//! # }
//! ```

mod cache_control;
mod observability;
mod recovery;
mod security;

pub use cache_control::RouterCacheControlExt;
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, MAX_BODY_SIZE, RouterSecurityExt};
