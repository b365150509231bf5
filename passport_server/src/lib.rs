//! # Passport
//!
//! The identity service of the msg platform. It registers users, exchanges a login and password for a bearer
//! credential, and answers `/check_token` for the gateway. Profile endpoints are reached through the gateway only,
//! which replaces the credential with a trusted `X-User-Id` assertion.
//!
//! Configuration is read from the environment; see [`config::PassportConfig::try_from_env`].
pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod events;
pub mod routes;
pub mod server;
pub mod subject;

#[cfg(test)]
mod endpoint_tests;

/// Printed when the binary is started with any command line argument.
pub const CLI_HELP: &str = include_str!("cli-help.txt");

/// Non-secret environment variables shown alongside the help text.
pub const DISPLAY_ENVS: [&str; 9] = [
    "RUST_LOG",
    "PASSPORT_HOST",
    "PASSPORT_PORT",
    "PASSPORT_DATABASE_URL",
    "PASSPORT_TOKEN_LIFETIME_HOURS",
    "PASSPORT_EVENTS_URL",
    "PASSPORT_EVENTS_TOPIC",
    "DB_CONNECT_ATTEMPTS",
    "DB_CONNECT_DELAY_MS",
];
