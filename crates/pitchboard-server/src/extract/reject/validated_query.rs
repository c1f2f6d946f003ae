//! Query extractor with `validator` rules applied after deserialization.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Query;
use crate::handler::{Error, ErrorKind};

/// Deserializes the query string and validates it.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateQuery<T>(pub T);

impl<T> ValidateQuery<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for ValidateQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = <Query<T> as FromRequestParts<S>>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}': {message}");
    }

    match error.code.as_ref() {
        "length" => match error.params.get("max").and_then(|v| v.as_u64()) {
            Some(max) => format!("Field '{field}' must be at most {max} characters long"),
            None => format!("Field '{field}' has invalid length"),
        },
        "required" => format!("Field '{field}' is required"),
        code => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        messages.sort();

        let message = match messages.as_slice() {
            [] => "Validation failed".to_owned(),
            _ => messages.join(". "),
        };

        tracing::debug!(
            errors = ?errors.field_errors(),
            "Query validation failed"
        );

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("query")
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Search {
        #[validate(length(max = 3))]
        query: String,
    }

    #[test]
    fn length_errors_name_the_field() {
        let errors = Search {
            query: "abcdef".to_owned(),
        }
        .validate()
        .unwrap_err();

        let error = Error::from(errors);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(
            error.message(),
            Some("Field 'query' must be at most 3 characters long")
        );
        assert_eq!(error.resource(), Some("query"));
    }
}
