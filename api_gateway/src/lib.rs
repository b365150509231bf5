//! # Gateway
//!
//! The public edge of the msg platform. Clients authenticate here, once per request, with the bearer credential
//! issued by the passport service. The gateway then calls the backends on the client's behalf, naming the caller
//! through the trusted subject assertion rather than forwarding the credential.
//!
//! * [`identity`] resolves credentials to subjects.
//! * [`middleware`] guards the protected routes.
//! * [`proxy`] forwards passport calls over HTTP.
//! * [`posts_client`] speaks the posts RPC interface.
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod identity;
pub mod middleware;
pub mod posts_client;
pub mod proxy;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;

pub const CLI_HELP: &str = include_str!("cli-help.txt");

pub const DISPLAY_ENVS: [&str; 6] =
    ["RUST_LOG", "GATEWAY_HOST", "GATEWAY_PORT", "PASSPORT_URL", "POSTS_RPC_URL", "GATEWAY_RPC_TIMEOUT_MS"];
