use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Published by the passport service after a user account has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegisteredEvent {
    pub user_id: String,
    pub login: String,
    pub registered_at: DateTime<Utc>,
}

impl UserRegisteredEvent {
    pub fn new<S: Into<String>>(user_id: S, login: S) -> Self {
        Self { user_id: user_id.into(), login: login.into(), registered_at: Utc::now() }
    }
}
