use serde::Serialize;

/// JSON body of every error response.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ErrorResponse<'a> {
    /// Snake-case error kind, e.g. `not_found`.
    pub name: &'a str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'a str>,
}
