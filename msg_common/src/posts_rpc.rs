//! Request and response objects of the posts RPC interface.
//!
//! Every call is `POST /rpc/<Method>` with the request serialized as JSON. The caller's identity is not part of
//! the request objects; it travels as call metadata (see [`crate::trust`]). Failed calls return an
//! [`ErrorResponse`](crate::ErrorResponse) with the status code of its category.
use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Page size used when a listing request does not specify a limit.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostsMethod {
    CreatePost,
    GetPostById,
    UpdatePost,
    DeletePost,
    GetPosts,
    ViewPost,
    LikePost,
    CommentPost,
    GetComments,
}

impl PostsMethod {
    pub const ALL: [PostsMethod; 9] = [
        Self::CreatePost,
        Self::GetPostById,
        Self::UpdatePost,
        Self::DeletePost,
        Self::GetPosts,
        Self::ViewPost,
        Self::LikePost,
        Self::CommentPost,
        Self::GetComments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreatePost => "CreatePost",
            Self::GetPostById => "GetPostById",
            Self::UpdatePost => "UpdatePost",
            Self::DeletePost => "DeletePost",
            Self::GetPosts => "GetPosts",
            Self::ViewPost => "ViewPost",
            Self::LikePost => "LikePost",
            Self::CommentPost => "CommentPost",
            Self::GetComments => "GetComments",
        }
    }

    pub fn path(&self) -> String {
        format!("/rpc/{}", self.name())
    }
}

impl Display for PostsMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//--------------------------------------------   Records   -------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub post_id: String,
    pub title: String,
    pub description: String,
    pub creator_id: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub comment_id: String,
    pub post_id: String,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------------   Requests   ------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostIdRequest {
    pub post_id: String,
}

impl PostIdRequest {
    pub fn new<S: Into<String>>(post_id: S) -> Self {
        Self { post_id: post_id.into() }
    }
}

/// Only the fields that are `Some` are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub post_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_private: Option<bool>,
}

/// Pagination parameters. `start_from` defaults to the epoch and `limit` to [`DEFAULT_PAGE_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub start_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPostRequest {
    pub post_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCommentsRequest {
    pub post_id: String,
    #[serde(flatten)]
    pub page: PageRequest,
}

//--------------------------------------------   Responses   -----------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub post: Post,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePostResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPostResponse {
    pub post_id: String,
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikePostResponse {
    pub post_id: String,
    /// Whether the subject likes the post after the call.
    pub liked: bool,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub comment: Comment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsPage {
    pub comments: Vec<Comment>,
    pub total_count: i64,
}
