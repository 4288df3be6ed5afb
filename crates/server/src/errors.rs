use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body returned by every handler.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Resource not found", Some(e.to_string())),
            ServiceError::IntegrityConflict(_) => Self::new(StatusCode::CONFLICT, "Database exception", Some(e.to_string())),
            ServiceError::StorageFailure(_) => {
                error!(code = e.code(), err = %e, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage failure", Some(e.to_string()))
            }
        }
    }
}

/// Extractor rejections keep axum's status and text but use the JSON error body.
fn rejected(status: StatusCode, message: String) -> JsonApiError {
    JsonApiError::new(status, status.canonical_reason().unwrap_or("Bad Request"), Some(message))
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self { rejected(r.status(), r.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self { rejected(r.status(), r.body_text()) }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self { rejected(r.status(), r.body_text()) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = serde_json::json!({
            "status": status.as_u16(),
            "error": self.error,
            "message": self.message,
        });
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::not_found("Entity not found"), StatusCode::NOT_FOUND),
            (ServiceError::IntegrityConflict("Integrity violation".into()), StatusCode::CONFLICT),
            (ServiceError::StorageFailure("pool timed out".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn rejection_keeps_status_and_reason() {
        let e = rejected(StatusCode::UNPROCESSABLE_ENTITY, "missing field `name`".into());
        assert_eq!(e.error, "Unprocessable Entity");
        assert_eq!(e.message.as_deref(), Some("missing field `name`"));
        assert_eq!(e.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_keeps_service_message() {
        let e = JsonApiError::from(ServiceError::not_found("Id not found 9"));
        assert_eq!(e.message.as_deref(), Some("Id not found 9"));
    }
}
