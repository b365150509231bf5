//! User accounts for the passport service.
use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewUser, ProfileUpdate, Registration, UserProfile},
    events::{EventProducers, UserRegisteredEvent},
    helpers::{hash_password, verify_password},
    msg_api::errors::PassportApiError,
    traits::UserManagement,
};

pub struct PassportApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for PassportApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PassportApi")
    }
}

impl<B> PassportApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> PassportApi<B>
where B: UserManagement
{
    /// Stores a new account and returns its user id. A [`UserRegisteredEvent`] is published once the account exists.
    pub async fn register(&self, registration: Registration) -> Result<String, PassportApiError> {
        for (field, value) in
            [("login", &registration.login), ("email", &registration.email), ("password", &registration.password)]
        {
            if value.trim().is_empty() {
                return Err(PassportApiError::InvalidInput(format!("{field} must not be empty")));
            }
        }
        let Registration { login, email, password, name, surname, date_of_birth, phone_number } = registration;
        let hashed_password = run_blocking(move || hash_password(&password)).await??;
        let user = NewUser { login: login.clone(), email, hashed_password, name, surname, date_of_birth, phone_number };
        let user_id = self.db.insert_user(user).await?;
        info!("🧑️ New user {login} registered as {user_id}");
        self.call_user_registered_hook(&user_id, &login).await;
        Ok(user_id)
    }

    /// Checks a login/password pair and returns the user id on success. Unknown logins and wrong passwords are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<String, PassportApiError> {
        let creds = self.db.fetch_credentials(login).await?.ok_or_else(|| {
            debug!("🧑️ Login attempt for unknown user {login}");
            PassportApiError::InvalidCredentials
        })?;
        let password = password.to_string();
        let hash = creds.hashed_password;
        run_blocking(move || verify_password(&password, &hash)).await??;
        debug!("🧑️ {login} authenticated");
        Ok(creds.user_id)
    }

    pub async fn profile(&self, user_id: &str) -> Result<UserProfile, PassportApiError> {
        self.db.fetch_profile(user_id).await?.ok_or(PassportApiError::UserNotFound)
    }

    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<(), PassportApiError> {
        if update.email.as_ref().is_some_and(|e| e.trim().is_empty()) {
            return Err(PassportApiError::InvalidInput("email must not be empty".into()));
        }
        if !self.db.update_profile(user_id, update).await? {
            return Err(PassportApiError::UserNotFound);
        }
        debug!("🧑️ Profile of {user_id} updated");
        Ok(())
    }

    async fn call_user_registered_hook(&self, user_id: &str, login: &str) {
        for emitter in &self.producers.user_registered_producer {
            debug!("🧑️ Notifying user registered hook subscribers");
            emitter.publish_event(UserRegisteredEvent::new(user_id, login)).await;
        }
    }
}

/// Runs CPU-bound password work on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, PassportApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| PassportApiError::PasswordError(e.to_string()))
}
