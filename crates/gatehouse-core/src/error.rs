//! Unified application error types for Gatehouse.
//!
//! Every gate, store, and external adapter reports failures as an
//! [`AppError`]. The [`ErrorKind`] determines the wire code and HTTP status
//! the RPC layer returns to the caller.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No authenticated identity, or the caller is not a member of the
    /// selected organization.
    Unauthorized,
    /// Malformed input, missing organization selection, or a failed
    /// bot-verification verdict.
    BadRequest,
    /// A feature the procedure depends on is disabled.
    PreconditionFailed,
    /// A required verification token was not supplied.
    Forbidden,
    /// The caller exhausted the quota for the route.
    TooManyRequests,
    /// The requested procedure or resource does not exist.
    NotFound,
    /// An external collaborator (session store, limiter, verifier) failed.
    ServiceUnavailable,
    /// An internal server error occurred.
    Internal,
    /// A configuration error occurred.
    Configuration,
    /// A cache backend error occurred.
    Cache,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An outbound HTTP call returned an unusable response.
    ExternalService,
}

impl ErrorKind {
    /// Returns the wire code reported to RPC callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::BadRequest => "BAD_REQUEST",
            Self::PreconditionFailed => "PRECONDITION_FAILED",
            Self::Forbidden => "FORBIDDEN",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::NotFound => "NOT_FOUND",
            Self::ServiceUnavailable | Self::Cache | Self::ExternalService => {
                "SERVICE_UNAVAILABLE"
            }
            Self::Internal | Self::Configuration | Self::Serialization => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Whether the kind describes a failure inside the server rather than a
    /// rejected caller.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable
                | Self::Internal
                | Self::Configuration
                | Self::Cache
                | Self::Serialization
                | Self::ExternalService
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::PreconditionFailed => write!(f, "PRECONDITION_FAILED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::TooManyRequests => write!(f, "TOO_MANY_REQUESTS"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Cache => write!(f, "CACHE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
        }
    }
}

/// The unified application error used throughout Gatehouse.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Where the client should send the user to recover (e.g. a sign-in page).
    pub redirect: Option<String>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            redirect: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            redirect: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach a redirect hint for the client.
    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a bad-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Create a precondition-failed error.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PreconditionFailed, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a too-many-requests error.
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TooManyRequests, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            redirect: self.redirect.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
