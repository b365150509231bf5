//! # Posts
//!
//! The posts RPC service. It stores posts, likes, comments and views, and enforces who may do what with them.
//! The service never sees a credential: callers are identified by the `actor_user_id` metadata that the gateway
//! attaches after authenticating the client.
pub mod actor;
pub mod config;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;

pub const CLI_HELP: &str = include_str!("cli-help.txt");

pub const DISPLAY_ENVS: [&str; 6] =
    ["RUST_LOG", "POSTS_HOST", "POSTS_PORT", "POSTS_DATABASE_URL", "DB_CONNECT_ATTEMPTS", "DB_CONNECT_DELAY_MS"];
