use log::*;
use msg_common::{
    helpers::{duration_ms_or, optional_secret, required_var, var_or, ConfigError},
    TrustConfig,
};
use msg_engine::helpers::RetryPolicy;

const DEFAULT_POSTS_HOST: &str = "0.0.0.0";
const DEFAULT_POSTS_PORT: u16 = 9090;

#[derive(Clone, Debug)]
pub struct PostsConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Shared with the gateway. When set, `actor_user_id` must come with a valid `X-Subject-Signature`.
    pub trust: TrustConfig,
    pub db_retry: RetryPolicy,
}

impl PostsConfig {
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let host = var_or("POSTS_HOST", DEFAULT_POSTS_HOST.to_string());
        let port = var_or("POSTS_PORT", DEFAULT_POSTS_PORT);
        let database_url = required_var("POSTS_DATABASE_URL")?;
        let internal_secret = optional_secret("MSG_INTERNAL_SECRET");
        if internal_secret.is_none() {
            warn!(
                "🪛️ MSG_INTERNAL_SECRET is not set. actor_user_id is trusted without a signature, so this service must \
                 not be reachable from outside the private network."
            );
        }
        let db_retry = RetryPolicy::new(
            var_or("DB_CONNECT_ATTEMPTS", RetryPolicy::default().attempts),
            duration_ms_or("DB_CONNECT_DELAY_MS", RetryPolicy::default().delay),
        );
        Ok(Self { host, port, database_url, trust: TrustConfig::new(internal_secret), db_retry })
    }
}
