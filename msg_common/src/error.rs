use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The error taxonomy shared by all services. Each category maps onto exactly one HTTP status code, so that a
/// failure decided in a backend service surfaces with the same meaning at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Missing, invalid or expired credential, or a missing trusted subject assertion.
    Unauthenticated,
    /// The subject does not own the resource, or may not see it.
    PermissionDenied,
    NotFound,
    /// Malformed request body or query parameter.
    InvalidInput,
    /// Downstream store or verifier failure.
    Internal,
}

impl ErrorCategory {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::PermissionDenied => 403,
            Self::NotFound => 404,
            Self::InvalidInput => 400,
            Self::Internal => 500,
        }
    }

    /// Recovers the category from an HTTP status code returned by a backend that did not send a structured body.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthenticated,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            400 | 422 => Self::InvalidInput,
            _ => Self::Internal,
        }
    }
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// The body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub category: ErrorCategory,
    pub error: String,
}

impl ErrorResponse {
    pub fn new<S: Display>(category: ErrorCategory, message: S) -> Self {
        Self { category, error: message.to_string() }
    }
}
