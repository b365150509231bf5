use std::time::Duration;

use chrono::Duration as ChronoDuration;
use log::*;
use msg_common::{
    helpers::{duration_ms_or, optional_secret, required_secret, required_var, var_or, ConfigError},
    Secret,
    TrustConfig,
};
use msg_engine::helpers::RetryPolicy;

const DEFAULT_PASSPORT_HOST: &str = "0.0.0.0";
const DEFAULT_PASSPORT_PORT: u16 = 8080;
const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 72;
const DEFAULT_EVENTS_TOPIC: &str = "user_registrations";

#[derive(Clone, Debug)]
pub struct PassportConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// Shared with the gateway. When set, `X-User-Id` must come with a valid `X-Subject-Signature`.
    pub trust: TrustConfig,
    pub events: EventsConfig,
    pub db_retry: RetryPolicy,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: Secret<String>,
    pub token_lifetime: ChronoDuration,
}

impl AuthConfig {
    pub fn new(jwt_secret: Secret<String>, token_lifetime: ChronoDuration) -> Self {
        Self { jwt_secret, token_lifetime }
    }
}

/// Where registration events go. Without a URL, events are only logged.
#[derive(Clone, Debug, Default)]
pub struct EventsConfig {
    pub url: Option<String>,
    pub topic: String,
}

impl PassportConfig {
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let host = var_or("PASSPORT_HOST", DEFAULT_PASSPORT_HOST.to_string());
        let port = var_or("PASSPORT_PORT", DEFAULT_PASSPORT_PORT);
        let database_url = required_var("PASSPORT_DATABASE_URL")?;
        let jwt_secret = required_secret("JWT_SECRET")?;
        let lifetime_hours = var_or("PASSPORT_TOKEN_LIFETIME_HOURS", DEFAULT_TOKEN_LIFETIME_HOURS);
        if lifetime_hours < 1 {
            return Err(ConfigError::Invalid {
                name: "PASSPORT_TOKEN_LIFETIME_HOURS".into(),
                reason: "Tokens must live for at least one hour".into(),
            });
        }
        let auth = AuthConfig::new(jwt_secret, ChronoDuration::hours(lifetime_hours));
        let internal_secret = optional_secret("MSG_INTERNAL_SECRET");
        if internal_secret.is_none() {
            warn!(
                "🪛️ MSG_INTERNAL_SECRET is not set. X-User-Id is trusted without a signature, so this service must not \
                 be reachable from outside the private network."
            );
        }
        let events = EventsConfig {
            url: std::env::var("PASSPORT_EVENTS_URL").ok().filter(|s| !s.trim().is_empty()),
            topic: var_or("PASSPORT_EVENTS_TOPIC", DEFAULT_EVENTS_TOPIC.to_string()),
        };
        let db_retry = RetryPolicy::new(
            var_or("DB_CONNECT_ATTEMPTS", RetryPolicy::default().attempts),
            duration_ms_or("DB_CONNECT_DELAY_MS", RetryPolicy::default().delay),
        );
        Ok(Self { host, port, database_url, auth, trust: TrustConfig::new(internal_secret), events, db_retry })
    }
}

impl Default for PassportConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PASSPORT_HOST.into(),
            port: DEFAULT_PASSPORT_PORT,
            database_url: String::default(),
            auth: AuthConfig::new(Secret::default(), ChronoDuration::hours(DEFAULT_TOKEN_LIFETIME_HOURS)),
            trust: TrustConfig::default(),
            events: EventsConfig { url: None, topic: DEFAULT_EVENTS_TOPIC.into() },
            db_retry: RetryPolicy::new(1, Duration::from_millis(0)),
        }
    }
}
