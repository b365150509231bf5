//! Likes, comments and views.
use log::trace;
use msg_common::SubjectId;
use sqlx::SqliteConnection;

use super::{new_id, timestamp};
use crate::db_types::{Comment, CommentQuery, LikeStatus, NewComment};

pub async fn record_view(post_id: &str, viewer: &SubjectId, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query("INSERT INTO views (post_id, user_id, viewed_at) VALUES ($1, $2, $3)")
        .bind(post_id)
        .bind(viewer.as_str())
        .bind(timestamp())
        .execute(&mut *conn)
        .await?;
    count_views(post_id, conn).await
}

pub async fn count_views(post_id: &str, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM views WHERE post_id = $1").bind(post_id).fetch_one(conn).await
}

pub async fn count_likes(post_id: &str, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1").bind(post_id).fetch_one(conn).await
}

/// Removes the like if present, otherwise inserts it. Run inside a transaction.
pub async fn toggle_like(
    post_id: &str,
    user: &SubjectId,
    conn: &mut SqliteConnection,
) -> Result<LikeStatus, sqlx::Error> {
    let removed = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user.as_str())
        .execute(&mut *conn)
        .await?
        .rows_affected();
    let liked = removed == 0;
    if liked {
        sqlx::query("INSERT INTO likes (post_id, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(post_id)
            .bind(user.as_str())
            .bind(timestamp())
            .execute(&mut *conn)
            .await?;
    }
    let likes = count_likes(post_id, conn).await?;
    trace!("👍️ {user} {} post {post_id}. It has {likes} likes", if liked { "liked" } else { "unliked" });
    Ok(LikeStatus { liked, likes })
}

pub async fn insert_comment(comment: NewComment, conn: &mut SqliteConnection) -> Result<Comment, sqlx::Error> {
    sqlx::query_as(
        r#"
            INSERT INTO comments (comment_id, post_id, user_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(new_id())
    .bind(comment.post_id)
    .bind(comment.user_id.as_str())
    .bind(comment.text)
    .bind(timestamp())
    .fetch_one(conn)
    .await
}

/// Comments for a post, ordered by `created_at` in ascending order.
pub async fn fetch_comments(query: CommentQuery, conn: &mut SqliteConnection) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as(
        r#"
            SELECT * FROM comments
            WHERE post_id = $1 AND created_at >= $2
            ORDER BY created_at ASC, rowid ASC
            LIMIT $3
        "#,
    )
    .bind(query.post_id)
    .bind(query.page.start_from)
    .bind(query.page.limit)
    .fetch_all(conn)
    .await
}
