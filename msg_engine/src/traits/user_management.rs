use thiserror::Error;

use crate::db_types::{NewUser, ProfileUpdate, UserCredentials, UserProfile};

#[derive(Debug, Clone, Error)]
pub enum UserStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("A user with this login or email already exists")]
    UserAlreadyExists,
}

impl From<sqlx::Error> for UserStoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => UserStoreError::UserAlreadyExists,
            e => UserStoreError::DatabaseError(e.to_string()),
        }
    }
}

/// Persistent storage for passport user accounts.
#[allow(async_fn_in_trait)]
pub trait UserManagement {
    /// Stores a new user and returns the id assigned to it. Fails with [`UserStoreError::UserAlreadyExists`] if the
    /// login or email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<String, UserStoreError>;

    async fn fetch_credentials(&self, login: &str) -> Result<Option<UserCredentials>, UserStoreError>;

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, UserStoreError>;

    /// Returns `false` if the user does not exist.
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<bool, UserStoreError>;
}
