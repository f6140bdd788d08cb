use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};
use tracing::{error, warn};

use service::errors::ServiceError;

use crate::observability;

/// JSON error body: `{"error": <title>, "message": <detail>, "field": <name>}`.
/// `message` and `field` are omitted when absent.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
    pub field: Option<&'static str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message, field: None }
    }

    /// Translate a service condition raised by `operation`.
    ///
    /// Client errors keep their message. Anything else becomes a bare 500
    /// and the underlying cause only goes to the log.
    pub fn from_service(operation: &'static str, err: ServiceError) -> Self {
        observability::record_error(err.kind());
        let message = err.to_string();
        match err {
            ServiceError::NotFound(_) => {
                warn!(component = "product", operation, kind = "not_found", error = %message, "request rejected");
                Self::new(StatusCode::NOT_FOUND, "Not Found", Some(message))
            }
            ServiceError::InvalidArgument { field, .. } => {
                warn!(component = "product", operation, kind = "invalid_argument", field, error = %message, "request rejected");
                Self { field: Some(field), ..Self::new(StatusCode::BAD_REQUEST, "Invalid Argument", Some(message)) }
            }
            ServiceError::Db(_) => {
                error!(component = "product", operation, kind = "db", error = %message, "product operation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert("error".into(), Value::from(self.error));
        if let Some(msg) = self.message {
            body.insert("message".into(), Value::from(msg));
        }
        if let Some(field) = self.field {
            body.insert("field".into(), Value::from(field));
        }
        (self.status, Json(Value::Object(body))).into_response()
    }
}

/// Shorthand used by `?` inside handlers once the operation name is known.
pub fn translate(operation: &'static str) -> impl FnOnce(ServiceError) -> JsonApiError {
    move |e| JsonApiError::from_service(operation, e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    async fn body_json(err: JsonApiError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_is_404_with_message() {
        let (status, body) = body_json(JsonApiError::from_service("get_product", ServiceError::not_found("product", 3))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not Found", "message": "product 3 not found"}));
    }

    #[tokio::test]
    async fn invalid_argument_is_400_and_names_the_field() {
        let err = ServiceError::invalid_argument("size", "must be greater than 0, got 0");
        let (status, body) = body_json(JsonApiError::from_service("list_products", err)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "size");
        assert!(body["message"].as_str().unwrap().contains("size"));
    }

    #[tokio::test]
    async fn db_errors_are_500_without_detail() {
        let err = ServiceError::Db("password authentication failed for user \"catalog\"".into());
        let (status, body) = body_json(JsonApiError::from_service("create_product", err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal Server Error"}));
    }
}
