use std::{env, fmt::Display, str::FromStr, time::Duration};

use log::*;
use thiserror::Error;

use crate::Secret;

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("{0} is required but has not been set")]
    Missing(String),
    #[error("Invalid value for {name}. {reason}")]
    Invalid { name: String, reason: String },
}

/// Reads a mandatory environment variable. Empty values count as missing.
pub fn required_var(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => {
            error!("🪛️ {name} is not set. The service cannot start without it.");
            Err(ConfigError::Missing(name.to_string()))
        },
    }
}

/// Reads a mandatory secret from the environment.
pub fn required_secret(name: &str) -> Result<Secret<String>, ConfigError> {
    required_var(name).map(Secret::new)
}

/// Reads an optional secret. Empty values are treated as not set.
pub fn optional_secret(name: &str) -> Option<Secret<String>> {
    env::var(name).ok().filter(|s| !s.trim().is_empty()).map(Secret::new)
}

/// Reads an optional environment variable, falling back to `default` when it is missing or cannot be parsed.
pub fn var_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(name) {
        Ok(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            warn!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => {
            info!("🪛️ {name} is not set. Using the default value of {default}.");
            default
        },
    }
}

/// Reads a duration given in milliseconds.
pub fn duration_ms_or(name: &str, default: Duration) -> Duration {
    let ms = var_or::<u64>(name, default.as_millis() as u64);
    Duration::from_millis(ms)
}

/// Strips any trailing slashes from a base URL so that paths can be appended with `format!("{base}/path")`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
