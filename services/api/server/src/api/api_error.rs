use chrono::Utc;
use serde::Serialize;

/// Error body shared by every endpoint.
#[derive(Serialize, Default)]
pub struct ApiError {
    #[serde(skip)]
    pub(crate) status_code: axum::http::StatusCode,
    #[serde(rename = "error")]
    pub(crate) message: String,
    pub(crate) details: Vec<ApiErrorDetail>,
    pub(crate) timestamp: String,
    pub(crate) request_id: String,
}

impl ApiError {
    fn with_status(
        status_code: axum::http::StatusCode,
        message: String,
        details: Vec<ApiErrorDetail>,
        request_id: String,
    ) -> Self {
        Self {
            status_code,
            message,
            details,
            timestamp: Utc::now().to_rfc3339(),
            request_id,
        }
    }

    pub fn bad_request(
        message: String,
        details: Vec<ApiErrorDetail>,
        request_id: String,
    ) -> Self {
        Self::with_status(
            axum::http::StatusCode::BAD_REQUEST,
            message,
            details,
            request_id,
        )
    }

    pub fn not_found(
        message: String,
        details: Vec<ApiErrorDetail>,
        request_id: String,
    ) -> Self {
        Self::with_status(
            axum::http::StatusCode::NOT_FOUND,
            message,
            details,
            request_id,
        )
    }

    pub fn internal_server_error(
        message: String,
        details: Vec<ApiErrorDetail>,
        request_id: String,
    ) -> Self {
        Self::with_status(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            message,
            details,
            request_id,
        )
    }

    pub fn service_unavailable(
        message: String,
        details: Vec<ApiErrorDetail>,
        request_id: String,
    ) -> Self {
        Self::with_status(
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            message,
            details,
            request_id,
        )
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        self.status_code
    }
}

#[derive(Serialize, Debug, Default)]
pub struct ApiErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) field: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) suggestion: String,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if self.status_code.is_server_error() {
            sentry::Hub::with_active(|hub| hub.capture_error(&self));
        }

        (self.status_code, axum::Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}, {}, {}",
            self.status_code,
            self.message,
            self.request_id,
            self.details
                .iter()
                .map(|d| d.message.clone())
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("status_code", &self.status_code)
            .field("message", &self.message)
            .field("details", &self.details)
            .field("timestamp", &self.timestamp)
            .field("request_id", &self.request_id)
            .finish()
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_body_uses_error_key() {
        let err = ApiError::not_found(
            "Device not found".to_string(),
            vec![],
            "req-1".to_string(),
        );
        let body = serde_json::to_value(&err).unwrap();

        assert_eq!(body["error"], "Device not found");
        assert_eq!(body["request_id"], "req-1");
        assert!(body.get("status_code").is_none());
        assert!(body["details"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = ApiError::bad_request(
            "Invalid device ID".to_string(),
            vec![],
            String::new(),
        )
        .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
