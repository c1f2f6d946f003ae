#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for content provider calls.
pub const TRACING_TARGET_CONTENT: &str = "pitchboard_core::content";

/// Tracing target for fetch cache activity.
pub const TRACING_TARGET_CACHE: &str = "pitchboard_core::cache";

mod error;
mod health;

pub mod cache;
pub mod format;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;
pub mod provider;
pub mod query;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use health::{ServiceHealth, ServiceStatus};
