use std::borrow::Cow;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::api::api_error::{ApiError, ApiErrorDetail};
use crate::shared::extractors::request_id::request_id_from_headers;

/// Query string deserialized into `T` and checked with [`validator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + validator::Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let request_id = request_id_from_headers(&parts.headers);

        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::bad_request(
                    "Invalid query parameters".to_string(),
                    vec![ApiErrorDetail {
                        field: None,
                        code: "invalid_query".to_string(),
                        message: rejection.body_text(),
                        suggestion: "Check the query string format".to_string(),
                    }],
                    request_id.to_string(),
                )
            })?;

        value.validate().map_err(|e| {
            ApiError::bad_request(
                "Validation failed".to_string(),
                validation_errors_to_details(&e),
                request_id.to_string(),
            )
        })?;

        Ok(ValidatedQuery(value))
    }
}

/// Flattens [`validator::ValidationErrors`] into one detail per failed rule.
pub fn validation_errors_to_details(
    errors: &validator::ValidationErrors,
) -> Vec<ApiErrorDetail> {
    let mut details = Vec::new();
    for (field, kind) in errors.errors() {
        if let validator::ValidationErrorsKind::Field(field_errors) = kind {
            for error in field_errors {
                let message = error
                    .message
                    .clone()
                    .unwrap_or(Cow::Owned(format!("{field} is invalid")));
                details.push(ApiErrorDetail {
                    field: Some(field.to_string()),
                    code: error.code.to_string(),
                    message: message.to_string(),
                    suggestion: "Check the field value and format".to_string(),
                });
            }
        }
    }

    if details.is_empty() {
        details.push(ApiErrorDetail {
            field: Some("query".to_string()),
            code: "validation_failed".to_string(),
            message: "Validation failed".to_string(),
            ..Default::default()
        });
    }

    details
}
