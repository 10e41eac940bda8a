use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id taken from the `x-request-id` header.
///
/// The header is set by the request-id layer when the caller did not send
/// one, and echoed on the response. A caller-supplied value is used as is,
/// so error bodies carry the same id as the response header.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// The `x-request-id` value, or a fresh UUID when it is missing, empty or
/// not valid text.
pub fn request_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|header| header.to_str().ok())
        .map(str::trim)
        .filter(|header_str| !header_str.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(request_id_from_headers(&parts.headers)))
    }
}

impl std::ops::Deref for RequestId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reads_uuid_header() {
        let id = Uuid::new_v4().to_string();
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&id).unwrap());

        assert_eq!(request_id_from_headers(&headers), id);
    }

    #[test]
    fn test_non_uuid_header_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("trace-abc-123"));

        assert_eq!(request_id_from_headers(&headers), "trace-abc-123");
    }

    #[test]
    fn test_missing_header_gets_fresh_uuid() {
        let id = request_id_from_headers(&HeaderMap::new());

        assert!(Uuid::parse_str(&id).is_ok());
    }
}
