use lambda_http::http::StatusCode;
use serde::Serialize;

/// Failure reported by the identity provider when creating an account.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityProviderError {
    #[error("email address is already registered")]
    EmailAlreadyExists,

    #[error("{0}")]
    Provider(String),
}

/// Failure talking to the role directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("{0}")]
    Request(String),
}

/// Errors surfaced to the caller of createUserWithRole.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisionError {
    #[error("The function must be called while authenticated.")]
    Unauthenticated,

    #[error("Only admins can create new user accounts.")]
    PermissionDenied,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("The email address is already in use by another account.")]
    AlreadyExists,

    #[error("{message}")]
    Internal { message: String, details: String },
}

impl ProvisionError {
    pub fn internal(message: impl Into<String>, details: impl Into<String>) -> Self {
        ProvisionError::Internal {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Wire code, in the callable-function vocabulary.
    pub fn code(&self) -> &'static str {
        match self {
            ProvisionError::Unauthenticated => "unauthenticated",
            ProvisionError::PermissionDenied => "permission-denied",
            ProvisionError::InvalidArgument(_) => "invalid-argument",
            ProvisionError::AlreadyExists => "already-exists",
            ProvisionError::Internal { .. } => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProvisionError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ProvisionError::PermissionDenied => StatusCode::FORBIDDEN,
            ProvisionError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ProvisionError::AlreadyExists => StatusCode::CONFLICT,
            ProvisionError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Auxiliary detail; only internal errors carry one.
    pub fn details(&self) -> Option<&str> {
        match self {
            ProvisionError::Internal { details, .. } => Some(details),
            _ => None,
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            details: self.details().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
