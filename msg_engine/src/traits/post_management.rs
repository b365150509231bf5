use msg_common::SubjectId;
use thiserror::Error;

use crate::db_types::{Comment, CommentQuery, LikeStatus, NewComment, NewPost, Post, PostQuery, PostUpdate};

#[derive(Debug, Clone, Error)]
pub enum PostStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Post {0} does not exist")]
    PostNotFound(String),
}

impl From<sqlx::Error> for PostStoreError {
    fn from(e: sqlx::Error) -> Self {
        PostStoreError::DatabaseError(e.to_string())
    }
}

/// Persistent storage for posts, likes, comments and views.
///
/// Methods that take an owner apply the ownership condition inside the same statement (or transaction) as the
/// mutation, so a post that changed hands or disappeared between a check and the write is never modified.
#[allow(async_fn_in_trait)]
pub trait PostManagement {
    /// Stores a new post. The store assigns the id and both timestamps.
    async fn insert_post(&self, post: NewPost) -> Result<Post, PostStoreError>;

    async fn fetch_post(&self, post_id: &str) -> Result<Option<Post>, PostStoreError>;

    /// Applies the update to the post if it exists and is owned by `owner`. Returns `None` if no row matched.
    /// `updated_at` strictly increases on every successful update.
    async fn update_post(
        &self,
        post_id: &str,
        owner: &SubjectId,
        update: PostUpdate,
    ) -> Result<Option<Post>, PostStoreError>;

    /// Deletes the post, along with its likes, comments and views, if it is owned by `owner`.
    /// Returns `false` if no row matched.
    async fn delete_post(&self, post_id: &str, owner: &SubjectId) -> Result<bool, PostStoreError>;

    /// Lists posts visible to the query's viewer, oldest first.
    async fn fetch_posts(&self, query: PostQuery) -> Result<Vec<Post>, PostStoreError>;

    /// Appends a view record and returns the total number of views of the post.
    async fn record_view(&self, post_id: &str, viewer: &SubjectId) -> Result<i64, PostStoreError>;

    /// Removes the user's like if it exists, otherwise adds one.
    async fn toggle_like(&self, post_id: &str, user: &SubjectId) -> Result<LikeStatus, PostStoreError>;

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, PostStoreError>;

    /// Lists the comments of a post, oldest first.
    async fn fetch_comments(&self, query: CommentQuery) -> Result<Vec<Comment>, PostStoreError>;
}
