#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;

pub use client::SanityClient;
pub use config::{DEFAULT_API_VERSION, DEFAULT_DATASET, DEFAULT_TIMEOUT_SECS, SanityConfig};
pub use error::{Error, Result};

/// Tracing target for Sanity client operations.
pub const TRACING_TARGET: &str = "pitchboard_sanity::client";
