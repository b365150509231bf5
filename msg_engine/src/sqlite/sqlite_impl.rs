//! `SqliteDatabase` is the concrete storage backend of the msg engine.
//!
//! It implements both [`PostManagement`] and [`UserManagement`], so a single type serves the posts service and the
//! passport service, each with its own database file.
use std::fmt::Debug;

use log::*;
use msg_common::SubjectId;
use sqlx::{migrate::Migrator, SqlitePool};

use super::db::{new_pool, posts, social, users};
use crate::{
    db_types::{
        Comment,
        CommentQuery,
        LikeStatus,
        NewComment,
        NewPost,
        NewUser,
        Post,
        PostQuery,
        PostUpdate,
        ProfileUpdate,
        UserCredentials,
        UserProfile,
    },
    helpers::retry::{retry_with_fixed_delay, RetryPolicy},
    traits::{PostManagement, PostStoreError, UserManagement, UserStoreError},
};

static MIGRATOR: Migrator = sqlx::migrate!("./src/sqlite/migrations");

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl PostManagement for SqliteDatabase {
    async fn insert_post(&self, post: NewPost) -> Result<Post, PostStoreError> {
        let mut tx = self.pool.begin().await?;
        let post = posts::insert_post(post, &mut tx).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn fetch_post(&self, post_id: &str) -> Result<Option<Post>, PostStoreError> {
        let mut conn = self.pool.acquire().await?;
        let post = posts::fetch_post(post_id, &mut conn).await?;
        Ok(post)
    }

    async fn update_post(
        &self,
        post_id: &str,
        owner: &SubjectId,
        update: PostUpdate,
    ) -> Result<Option<Post>, PostStoreError> {
        let mut tx = self.pool.begin().await?;
        trace!("🗃️ Post {post_id} updating with new values: {update:?}");
        let post = posts::update_post(post_id, owner, update, &mut tx).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn delete_post(&self, post_id: &str, owner: &SubjectId) -> Result<bool, PostStoreError> {
        let mut tx = self.pool.begin().await?;
        let deleted = posts::delete_post(post_id, owner, &mut tx).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn fetch_posts(&self, query: PostQuery) -> Result<Vec<Post>, PostStoreError> {
        let mut conn = self.pool.acquire().await?;
        let posts = posts::fetch_posts(query, &mut conn).await?;
        Ok(posts)
    }

    async fn record_view(&self, post_id: &str, viewer: &SubjectId) -> Result<i64, PostStoreError> {
        let mut tx = self.pool.begin().await?;
        let views = social::record_view(post_id, viewer, &mut tx).await.map_err(|e| missing_post(post_id, e))?;
        tx.commit().await?;
        Ok(views)
    }

    async fn toggle_like(&self, post_id: &str, user: &SubjectId) -> Result<LikeStatus, PostStoreError> {
        let mut tx = self.pool.begin().await?;
        let status = social::toggle_like(post_id, user, &mut tx).await.map_err(|e| missing_post(post_id, e))?;
        tx.commit().await?;
        Ok(status)
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, PostStoreError> {
        let post_id = comment.post_id.clone();
        let mut tx = self.pool.begin().await?;
        let comment = social::insert_comment(comment, &mut tx).await.map_err(|e| missing_post(&post_id, e))?;
        tx.commit().await?;
        debug!("🗃️ Comment {} added to post {post_id}", comment.comment_id);
        Ok(comment)
    }

    async fn fetch_comments(&self, query: CommentQuery) -> Result<Vec<Comment>, PostStoreError> {
        let mut conn = self.pool.acquire().await?;
        let comments = social::fetch_comments(query, &mut conn).await?;
        Ok(comments)
    }
}

/// Likes, comments and views reference their post, so writing one for a missing post violates a foreign key.
fn missing_post(post_id: &str, e: sqlx::Error) -> PostStoreError {
    match e {
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            PostStoreError::PostNotFound(post_id.to_string())
        },
        e => e.into(),
    }
}

impl UserManagement for SqliteDatabase {
    async fn insert_user(&self, user: NewUser) -> Result<String, UserStoreError> {
        let mut conn = self.pool.acquire().await?;
        let id = users::insert_user(user, &mut conn).await?;
        Ok(id)
    }

    async fn fetch_credentials(&self, login: &str) -> Result<Option<UserCredentials>, UserStoreError> {
        let mut conn = self.pool.acquire().await?;
        let creds = users::fetch_credentials(login, &mut conn).await?;
        Ok(creds)
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, UserStoreError> {
        let mut conn = self.pool.acquire().await?;
        let profile = users::fetch_profile(user_id, &mut conn).await?;
        Ok(profile)
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.acquire().await?;
        let updated = users::update_profile(user_id, update, &mut conn).await?;
        Ok(updated)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Connects to the database, retrying according to `policy` if the database is not reachable yet.
    /// The error of the final attempt is returned if all attempts fail.
    pub async fn connect_with_retries(
        url: &str,
        max_connections: u32,
        policy: RetryPolicy,
    ) -> Result<Self, sqlx::Error> {
        retry_with_fixed_delay(policy, "database connection", || Self::new_with_url(url, max_connections)).await
    }

    /// Brings the schema up to date.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await?;
        info!("🗃️ Migrations complete for {}", self.url);
        Ok(())
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&mut self) {
        self.pool.close().await;
    }
}

