use msg_common::ErrorCategory;
use thiserror::Error;

use crate::{
    helpers::PasswordError,
    traits::{PostStoreError, UserStoreError},
};

#[derive(Debug, Clone, Error)]
pub enum PostsApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Post not found")]
    NotFound,
    #[error("{0}")]
    PermissionDenied(String),
    #[error("Storage error: {0}")]
    StoreError(String),
}

impl PostsApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) => ErrorCategory::InvalidInput,
            Self::NotFound => ErrorCategory::NotFound,
            Self::PermissionDenied(_) => ErrorCategory::PermissionDenied,
            Self::StoreError(_) => ErrorCategory::Internal,
        }
    }
}

impl From<PostStoreError> for PostsApiError {
    fn from(e: PostStoreError) -> Self {
        match e {
            PostStoreError::PostNotFound(_) => Self::NotFound,
            PostStoreError::DatabaseError(s) => Self::StoreError(s),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum PassportApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("A user with this login or email already exists")]
    UserAlreadyExists,
    #[error("Invalid login or password")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("Storage error: {0}")]
    StoreError(String),
    #[error("Password handling failed: {0}")]
    PasswordError(String),
}

impl PassportApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) | Self::UserAlreadyExists => ErrorCategory::InvalidInput,
            Self::InvalidCredentials => ErrorCategory::Unauthenticated,
            Self::UserNotFound => ErrorCategory::NotFound,
            Self::StoreError(_) | Self::PasswordError(_) => ErrorCategory::Internal,
        }
    }
}

impl From<UserStoreError> for PassportApiError {
    fn from(e: UserStoreError) -> Self {
        match e {
            UserStoreError::UserAlreadyExists => Self::UserAlreadyExists,
            UserStoreError::DatabaseError(s) => Self::StoreError(s),
        }
    }
}

impl From<PasswordError> for PassportApiError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::Mismatch => Self::InvalidCredentials,
            e => Self::PasswordError(e.to_string()),
        }
    }
}
