//! # Storage backend contracts.
//!
//! * [`PostManagement`] stores posts and the social records that hang off them (likes, comments and views).
//! * [`UserManagement`] stores the accounts managed by the passport service.
//!
//! Neither trait makes authorization decisions. Those belong to [`crate::PostsApi`] and [`crate::PassportApi`].
mod post_management;
mod user_management;

pub use post_management::{PostManagement, PostStoreError};
pub use user_management::{UserManagement, UserStoreError};
