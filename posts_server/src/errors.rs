use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::error;
use msg_common::{helpers::ConfigError, trust::TrustError, ErrorCategory, ErrorResponse};
use msg_engine::PostsApiError;
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
    #[error("Missing or invalid actor. {0}")]
    UntrustedActor(#[from] TrustError),
    #[error("{0}")]
    ApiError(#[from] PostsApiError),
}

impl ServerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequestBody(_) => ErrorCategory::InvalidInput,
            Self::UntrustedActor(_) => ErrorCategory::Unauthenticated,
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
            ErrorCategory::Internal => {
                error!("💻️ {self}");
                "Internal server error".to_string()
            },
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.category(), message))
    }
}
