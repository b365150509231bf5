//! # msg engine public API
//!
//! * [`posts_api`] is the authorization layer of the posts service. Every operation takes the subject on whose
//!   behalf it runs and decides, per resource, whether the subject may see or change it.
//! * [`passport_api`] manages user accounts and credentials checks for the passport service.
//!
//! Both follow the same pattern: the API object wraps a storage backend that implements the relevant trait from
//! [`crate::traits`].
//!
//! ```rust,ignore
//! use msg_engine::{PostsApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/posts.db", 25).await?;
//! let api = PostsApi::new(db);
//! let post = api.get_post(&subject, "6b0b...").await?;
//! ```
pub mod errors;
pub mod passport_api;
pub mod posts_api;
