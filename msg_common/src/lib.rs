//! Types and helpers shared by the msg services.
//!
//! * [`trust`] defines the trusted subject assertion that the gateway hands to the backend services, and the
//!   optional HMAC envelope around it.
//! * [`posts_rpc`] holds the request and response objects of the posts RPC interface.
//! * [`ErrorCategory`] is the error taxonomy that every service maps its failures onto.
//! * [`route!`] registers backend-generic actix handlers.
mod error;
mod route;
mod secret;

pub mod cli;
pub mod helpers;
pub mod posts_rpc;
pub mod trust;

pub use error::{ErrorCategory, ErrorResponse};
pub use secret::Secret;
pub use trust::{SubjectId, TrustConfig};
