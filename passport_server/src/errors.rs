use actix_web::{
    error::ResponseError,
    http::StatusCode,
    HttpResponse,
};
use msg_common::{helpers::ConfigError, trust::TrustError, ErrorCategory, ErrorResponse};
use msg_engine::PassportApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(#[from] ConfigError),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    InvalidRequestBody(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("{0}")]
    ApiError(#[from] PassportApiError),
    #[error("Missing or invalid user assertion. {0}")]
    UntrustedSubject(#[from] TrustError),
}

impl ServerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequestBody(_) => ErrorCategory::InvalidInput,
            Self::AuthenticationError(AuthError::CouldNotIssueToken(_)) => ErrorCategory::Internal,
            Self::AuthenticationError(_) => ErrorCategory::Unauthenticated,
            Self::UntrustedSubject(_) => ErrorCategory::Unauthenticated,
            Self::ApiError(e) => e.category(),
            Self::InitializeError(_) | Self::ConfigurationError(_) | Self::IOError(_) => ErrorCategory::Internal,
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.category().http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self.category() {
            ErrorCategory::Internal => "Internal server error".to_string(),
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.category(), message))
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token. {0}")]
    InvalidToken(String),
    #[error("Could not issue token. {0}")]
    CouldNotIssueToken(String),
}
