//! Maps `AppError` to RPC error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gatehouse_core::error::{AppError, ErrorKind};

/// RPC error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// Code, message and transport data of a failed call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Transport metadata.
    pub data: ApiErrorData,
}

/// Transport metadata attached to every error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorData {
    /// HTTP status the error was sent with.
    pub http_status: u16,
    /// Procedure path, when the failure belongs to a call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Where the client should send the user to recover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Returns the HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ServiceUnavailable | ErrorKind::Cache | ErrorKind::ExternalService => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// An [`AppError`] raised while serving a procedure call.
#[derive(Debug)]
pub struct ApiError {
    /// The underlying failure.
    pub error: AppError,
    /// Procedure path the failure belongs to.
    pub path: Option<String>,
}

impl ApiError {
    /// Attaches the procedure path to an error.
    pub fn for_path(error: AppError, path: impl Into<String>) -> Self {
        Self {
            error,
            path: Some(path.into()),
        }
    }

    /// Builds the response body.
    pub fn body(&self) -> ApiErrorResponse {
        let kind = self.error.kind;
        let status = status_for(kind);

        let message = match kind {
            k if k.is_server_fault() && status == StatusCode::SERVICE_UNAVAILABLE => {
                "Service temporarily unavailable".to_string()
            }
            k if k.is_server_fault() => "Internal server error".to_string(),
            _ => self.error.message.clone(),
        };

        ApiErrorResponse {
            error: ApiErrorBody {
                code: kind.code().to_string(),
                message,
                data: ApiErrorData {
                    http_status: status.as_u16(),
                    path: self.path.clone(),
                    redirect: self.error.redirect.clone(),
                },
            },
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self { error, path: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.error.kind);
        if self.error.kind.is_server_fault() {
            tracing::error!(
                path = self.path.as_deref().unwrap_or("-"),
                kind = %self.error.kind,
                error = %self.error,
                source = ?self.error.source,
                "Procedure call failed"
            );
        }
        (status, Json(self.body())).into_response()
    }
}
