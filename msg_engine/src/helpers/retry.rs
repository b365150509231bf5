//! Bounded retries for startup dependencies. Request paths never retry.
use std::{fmt::Display, future::Future, time::Duration};

use log::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 10, delay: Duration::from_secs(2) }
    }
}

/// Calls `op` until it succeeds or `policy.attempts` calls have failed, sleeping `policy.delay` between calls.
/// At least one attempt is always made.
pub async fn retry_with_fixed_delay<T, E, F, Fut>(policy: RetryPolicy, what: &str, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(v) => {
                if attempt > 1 {
                    info!("🔁️ {what} succeeded after {attempt} attempts");
                }
                return Ok(v);
            },
            Err(e) if attempt < attempts => {
                warn!("🔁️ {what} failed (attempt {attempt}/{attempts}): {e}. Retrying in {:?}", policy.delay);
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            },
            Err(e) => {
                error!("🔁️ {what} failed after {attempts} attempts: {e}");
                return Err(e);
            },
        }
    }
}
