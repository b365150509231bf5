use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::*;
use msg_common::{helpers::ConfigError, ErrorCategory, ErrorResponse};
use thiserror::Error;

use crate::posts_client::RpcError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Could not initialize the gateway. {0}")]
    InitializeError(String),
    #[error("Invalid gateway configuration. {0}")]
    ConfigurationError(#[from] ConfigError),
    #[error("An I/O error happened in the gateway. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Missing, invalid or expired credential")]
    Unauthenticated,
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    RpcError(#[from] RpcError),
    #[error("Could not proxy the request to the passport service. {0}")]
    ProxyError(String),
}

impl GatewayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthenticated => ErrorCategory::Unauthenticated,
            Self::InvalidInput(_) => ErrorCategory::InvalidInput,
            Self::RpcError(e) => e.category(),
            Self::InitializeError(_) | Self::ConfigurationError(_) | Self::IOError(_) | Self::ProxyError(_) => {
                ErrorCategory::Internal
            },
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.category().http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self.category() {
            ErrorCategory::Internal => {
                error!("🚪️ {self}");
                "Service error".to_string()
            },
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.category(), message))
    }
}
