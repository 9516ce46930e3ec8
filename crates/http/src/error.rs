//! Error handling for the bookshelf HTTP layer
//!
//! Two body shapes reach clients. Errors raised by the handler itself carry a
//! structured `{"error": "<message>"}` body. Errors that originate elsewhere
//! (a downstream collaborator, a body decoder) are serialized as the raw
//! error value the collaborator produced.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

/// Handler errors that map to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    /// Structurally invalid request input (bad path id, undecodable body).
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// The downstream collaborator returned an empty result.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Invalid input reported with the decoder's own error value.
    #[error("malformed input: {body}")]
    Malformed { body: Value },

    /// The downstream collaborator failed; `body` is its serialized error.
    #[error("downstream failure: {message}")]
    Downstream { message: String, body: Value },
}

impl ApiError {
    /// Create a bad request error with a structured body
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error with a structured body
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a bad request error whose body is the given value, serialized as is
    pub fn malformed(body: impl Serialize) -> Self {
        Self::Malformed {
            body: to_raw_value(&body, "malformed input"),
        }
    }

    /// Wrap a downstream failure; the response body is the serialized error
    pub fn downstream<E>(err: E) -> Self
    where
        E: Serialize + std::fmt::Display,
    {
        let message = err.to_string();
        Self::Downstream {
            body: to_raw_value(&err, &message),
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::Malformed { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Downstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn to_raw_value(value: &impl Serialize, fallback: &str) -> Value {
    serde_json::to_value(value).unwrap_or_else(|_| json!({ "error": fallback }))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::BadRequest { message } | ApiError::NotFound { message } => {
                tracing::debug!(status_code = %status.as_u16(), %message, "request rejected");
                json!({ "error": message })
            }
            ApiError::Malformed { body } => {
                tracing::debug!(status_code = %status.as_u16(), "malformed request body");
                body
            }
            ApiError::Downstream { message, body } => {
                let error_id = Uuid::now_v7();
                tracing::error!(
                    error_id = %error_id,
                    status_code = %status.as_u16(),
                    error = %message,
                    "downstream failure"
                );
                body
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[derive(Debug, Serialize, Error)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    enum StoreError {
        #[error("store offline")]
        Offline { retry_after: u32 },
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_has_structured_body() {
        let response = ApiError::bad_request("Invalid ID").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Invalid ID"}));
    }

    #[tokio::test]
    async fn test_not_found_has_structured_body() {
        let response = ApiError::not_found("Book not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": "Book not found"}));
    }

    #[tokio::test]
    async fn test_downstream_error_is_serialized_raw() {
        let error = ApiError::downstream(StoreError::Offline { retry_after: 5 });
        assert_eq!(error.to_string(), "downstream failure: store offline");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"kind": "offline", "retry_after": 5})
        );
    }

    #[tokio::test]
    async fn test_malformed_keeps_decoder_body() {
        let response = ApiError::malformed(json!({"message": "expected value"})).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"message": "expected value"})
        );
    }
}
