//! msg engine
//!
//! The engine holds the storage and authorization logic shared by the msg services. It knows nothing about HTTP;
//! the servers translate requests into engine calls and engine errors into responses.
//!
//! The library is divided into these sections:
//! 1. Storage contracts ([`mod@traits`]) and their SQLite implementation, [`SqliteDatabase`]. Data types used by the
//!    storage layer are public and live in [`db_types`].
//! 2. The engine API ([`PostsApi`] and [`PassportApi`]). The posts API is the only place where the decision "may this
//!    subject touch this post" is made.
//! 3. Events ([`mod@events`]). The passport API publishes a [`events::UserRegisteredEvent`] for every new account.
//!    Subscribers register a hook and receive events on their own tasks.
pub mod db_types;
pub mod events;
pub mod helpers;
mod msg_api;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use msg_api::{
    errors::{PassportApiError, PostsApiError},
    passport_api::PassportApi,
    posts_api::PostsApi,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
