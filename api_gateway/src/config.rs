use std::time::Duration;

use log::*;
use msg_common::{
    helpers::{duration_ms_or, normalize_base_url, optional_secret, required_var, var_or, ConfigError},
    TrustConfig,
};

const DEFAULT_GATEWAY_HOST: &str = "0.0.0.0";
const DEFAULT_GATEWAY_PORT: u16 = 8000;
const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the passport service, without a trailing slash.
    pub passport_url: String,
    /// Base URL of the posts RPC service, without a trailing slash.
    pub posts_rpc_url: String,
    /// Upper bound on every outbound call: token checks, passport proxying and posts RPCs.
    pub rpc_timeout: Duration,
    /// When an internal secret is configured, every subject assertion the gateway attaches is signed with it.
    pub trust: TrustConfig,
}

impl GatewayConfig {
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let host = var_or("GATEWAY_HOST", DEFAULT_GATEWAY_HOST.to_string());
        let port = var_or("GATEWAY_PORT", DEFAULT_GATEWAY_PORT);
        let passport_url = normalize_base_url(&required_var("PASSPORT_URL")?);
        let posts_rpc_url = normalize_base_url(&required_var("POSTS_RPC_URL")?);
        let rpc_timeout = duration_ms_or("GATEWAY_RPC_TIMEOUT_MS", DEFAULT_RPC_TIMEOUT);
        if rpc_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "GATEWAY_RPC_TIMEOUT_MS".into(),
                reason: "The timeout must be greater than zero".into(),
            });
        }
        let trust = TrustConfig::new(optional_secret("MSG_INTERNAL_SECRET"));
        if !trust.is_signed() {
            info!("🪛️ MSG_INTERNAL_SECRET is not set. Subject assertions will be sent unsigned.");
        }
        Ok(Self { host, port, passport_url, posts_rpc_url, rpc_timeout, trust })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GATEWAY_HOST.into(),
            port: DEFAULT_GATEWAY_PORT,
            passport_url: String::default(),
            posts_rpc_url: String::default(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            trust: TrustConfig::default(),
        }
    }
}
