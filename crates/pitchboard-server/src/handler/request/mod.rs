//! Request path and query types.

mod paths;
mod queries;

pub use paths::{StartupPathParams, UserPathParams};
pub use queries::SearchParams;
