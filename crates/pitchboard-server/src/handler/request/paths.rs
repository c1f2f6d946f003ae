use serde::Deserialize;

/// `/startup/{id}` path parameters.
#[must_use]
#[derive(Debug, Clone, Deserialize)]
pub struct StartupPathParams {
    /// Startup document identifier.
    pub id: String,
}

/// `/user/{id}` path parameters.
#[must_use]
#[derive(Debug, Clone, Deserialize)]
pub struct UserPathParams {
    /// Author document identifier.
    pub id: String,
}
