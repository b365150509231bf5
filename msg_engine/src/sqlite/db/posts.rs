use chrono::{DateTime, Duration, Utc};
use log::{debug, trace};
use msg_common::SubjectId;
use sqlx::{QueryBuilder, SqliteConnection};

use super::{new_id, timestamp};
use crate::db_types::{NewPost, Post, PostQuery, PostUpdate};

pub async fn insert_post(post: NewPost, conn: &mut SqliteConnection) -> Result<Post, sqlx::Error> {
    let now = timestamp();
    let post: Post = sqlx::query_as(
        r#"
            INSERT INTO posts (
                post_id,
                title,
                description,
                creator_id,
                is_private,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(new_id())
    .bind(post.title)
    .bind(post.description)
    .bind(post.creator_id.as_str())
    .bind(post.is_private)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Post [{}] created by {}", post.post_id, post.creator_id);
    Ok(post)
}

pub async fn fetch_post(post_id: &str, conn: &mut SqliteConnection) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as("SELECT * FROM posts WHERE post_id = $1").bind(post_id).fetch_optional(conn).await?;
    Ok(post)
}

/// Rewrites `updated_at` with itself for a post owned by `owner` and returns the stored value. Inside a transaction
/// this takes the write lock before anything is read, so concurrent updates of the same post serialize.
async fn lock_owned_post(
    post_id: &str,
    owner: &SubjectId,
    conn: &mut SqliteConnection,
) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    sqlx::query_scalar(
        "UPDATE posts SET updated_at = updated_at WHERE post_id = $1 AND creator_id = $2 RETURNING updated_at",
    )
    .bind(post_id)
    .bind(owner.as_str())
    .fetch_optional(conn)
    .await
}

/// Updates the supplied fields of a post owned by `owner`. This is not atomic on its own; run it inside a
/// transaction.
pub async fn update_post(
    post_id: &str,
    owner: &SubjectId,
    update: PostUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Post>, sqlx::Error> {
    let Some(previous) = lock_owned_post(post_id, owner, &mut *conn).await? else {
        trace!("📝️ No post {post_id} owned by {owner}. Nothing to update");
        return Ok(None);
    };
    let updated_at = timestamp().max(previous + Duration::microseconds(1));
    let mut builder = QueryBuilder::new("UPDATE posts SET updated_at = ");
    builder.push_bind(updated_at);
    if let Some(title) = update.title {
        builder.push(", title = ");
        builder.push_bind(title);
    }
    if let Some(description) = update.description {
        builder.push(", description = ");
        builder.push_bind(description);
    }
    if let Some(is_private) = update.is_private {
        builder.push(", is_private = ");
        builder.push_bind(is_private);
    }
    builder.push(" WHERE post_id = ");
    builder.push_bind(post_id);
    builder.push(" AND creator_id = ");
    builder.push_bind(owner.as_str());
    builder.push(" RETURNING *");
    trace!("📝️ Executing query: {}", builder.sql());
    let post = builder.build_query_as::<Post>().fetch_optional(conn).await?;
    Ok(post)
}

/// Deletes a post owned by `owner` together with its likes, comments and views. Run inside a transaction.
pub async fn delete_post(post_id: &str, owner: &SubjectId, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let deleted = sqlx::query("DELETE FROM posts WHERE post_id = $1 AND creator_id = $2")
        .bind(post_id)
        .bind(owner.as_str())
        .execute(&mut *conn)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Ok(false);
    }
    for table in ["likes", "comments", "views"] {
        sqlx::query(&format!("DELETE FROM {table} WHERE post_id = $1")).bind(post_id).execute(&mut *conn).await?;
    }
    debug!("📝️ Post [{post_id}] deleted by its owner");
    Ok(true)
}

/// Fetches the posts visible to the query's viewer, ordered by `created_at` in ascending order.
pub async fn fetch_posts(query: PostQuery, conn: &mut SqliteConnection) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as(
        r#"
            SELECT * FROM posts
            WHERE created_at >= $1 AND (is_private = 0 OR creator_id = $2)
            ORDER BY created_at ASC, rowid ASC
            LIMIT $3
        "#,
    )
    .bind(query.page.start_from)
    .bind(query.viewer.as_str())
    .bind(query.page.limit)
    .fetch_all(conn)
    .await?;
    Ok(posts)
}
