//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Read JSON request bodies leniently into a field map
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An empty or non-object body reads as `{}` so field validation reports it

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderValue, StatusCode};
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::ApiError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a fresh UUID v4 for requests that arrive without an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID carried by a request, or "unknown".
pub fn request_id<B>(request: &axum::http::Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// JSON body read as a map of field name to value.
#[derive(Debug, Clone, Default)]
pub struct JsonPayload(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Payload {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| ApiError::Payload {
            status: StatusCode::BAD_REQUEST,
            message: format!("Malformed JSON body: {e}"),
        })?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde_json::json;

    use super::*;

    async fn read(body: &'static str) -> Result<JsonPayload, ApiError> {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();
        JsonPayload::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_object() {
        assert!(read("").await.unwrap().0.is_empty());
        assert!(read("  \n").await.unwrap().0.is_empty());
    }

    #[tokio::test]
    async fn test_non_object_body_is_empty_object() {
        assert!(read("[1, 2, 3]").await.unwrap().0.is_empty());
    }

    #[tokio::test]
    async fn test_object_body() {
        let payload = read(r#"{"name": "Kitchen", "extra": true}"#).await.unwrap();
        assert_eq!(payload.0.get("name"), Some(&json!("Kitchen")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let err = read("{name:").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_generated_ids_are_uuids() {
        let request = axum::http::Request::new(());
        let id = MakeRequestUuid.make_request_id(&request).unwrap();
        let text = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(text).is_ok());
    }
}
