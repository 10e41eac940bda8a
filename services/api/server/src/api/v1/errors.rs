use savings_store::{DeviceId, ValidationError};

use crate::api::api_error::{ApiError, ApiErrorDetail};
use crate::api::error_recorder::IntoApiError;

pub type HandlerResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Device not found")]
    DeviceNotFound(DeviceId),

    #[error("Invalid device ID")]
    InvalidDeviceId(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Device data unavailable: {0}")]
    DataUnavailable(String),
}

impl IntoApiError for Error {
    fn error_code(&self) -> &'static str {
        match self {
            Error::DeviceNotFound(_) => "device_not_found",
            Error::InvalidDeviceId(_) => "invalid_device_id",
            Error::Validation(ValidationError::InvalidTimezone(_)) => {
                "invalid_timezone"
            }
            Error::Validation(_) => "invalid_date_range",
            Error::DataUnavailable(_) => "data_unavailable",
        }
    }

    fn into_api_error(self, request_id: &str) -> ApiError {
        let code = self.error_code().to_string();
        match self {
            Error::DeviceNotFound(id) => ApiError::not_found(
                "Device not found".to_string(),
                vec![ApiErrorDetail {
                    field: Some("id".to_string()),
                    code,
                    message: format!("No device with id {id}"),
                    ..Default::default()
                }],
                request_id.to_string(),
            ),
            Error::InvalidDeviceId(raw) => ApiError::bad_request(
                "Invalid device ID".to_string(),
                vec![ApiErrorDetail {
                    field: Some("id".to_string()),
                    code,
                    message: format!("`{raw}` is not a numeric device id"),
                    ..Default::default()
                }],
                request_id.to_string(),
            ),
            Error::Validation(e) => {
                let field = match e {
                    ValidationError::InvalidStartDate => "start_date",
                    ValidationError::InvalidEndDate => "end_date",
                    ValidationError::StartAfterEnd => "start_date",
                    ValidationError::InvalidTimezone(_) => "timezone",
                };
                ApiError::bad_request(
                    e.to_string(),
                    vec![ApiErrorDetail {
                        field: Some(field.to_string()),
                        code,
                        message: e.to_string(),
                        suggestion: "Use YYYY-MM-DD, a local datetime or RFC 3339, and an IANA timezone name".to_string(),
                    }],
                    request_id.to_string(),
                )
            }
            Error::DataUnavailable(e) => ApiError::service_unavailable(
                "Device data unavailable".to_string(),
                vec![ApiErrorDetail {
                    field: None,
                    code,
                    message: e,
                    suggestion: "Please try again later".to_string(),
                }],
                request_id.to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_message_becomes_error_text() {
        let request_id = "req-7";
        let err = Error::from(ValidationError::StartAfterEnd)
            .into_api_error(request_id);

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "start_date must be before or equal to end_date");
        assert_eq!(err.request_id, request_id);
    }

    #[test]
    fn test_unknown_device_is_not_found() {
        let err = Error::DeviceNotFound(42).into_api_error("req-8");

        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Device not found");
        assert_eq!(err.details[0].code, "device_not_found");
    }

    #[test]
    fn test_invalid_device_id_is_bad_request() {
        let err = Error::InvalidDeviceId("abc".to_string());
        assert_eq!(err.error_code(), "invalid_device_id");

        let err = err.into_api_error("req-9");
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid device ID");
        assert_eq!(err.details[0].field.as_deref(), Some("id"));
    }
}
