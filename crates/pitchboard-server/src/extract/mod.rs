//! Request extractors with JSON error responses.
//!
//! - [`Path`] and [`Query`] replace their axum counterparts and reject with
//!   the handler [`Error`](crate::handler::Error) type.
//! - [`ValidateQuery`] additionally runs `validator` rules.
//! - [`RenderPass`](crate::service::RenderPass) is extracted fresh for every
//!   request from the service state.

mod render_pass;
pub mod reject;

pub use crate::extract::reject::{Path, Query, ValidateQuery};
