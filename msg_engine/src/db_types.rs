//! Data types shared by the storage traits, the SQLite backend and the engine APIs.
//!
//! The post and comment records themselves live in [`msg_common::posts_rpc`] since they are also the wire
//! representation returned to clients.
use chrono::{DateTime, NaiveDate, Utc};
use msg_common::{
    posts_rpc::{CreatePostRequest, PageRequest, UpdatePostRequest, DEFAULT_PAGE_LIMIT},
    SubjectId,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub use msg_common::posts_rpc::{Comment, Post};

//--------------------------------------------   Posts   ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub creator_id: SubjectId,
    pub is_private: bool,
}

impl NewPost {
    pub fn new(creator_id: SubjectId, request: CreatePostRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            creator_id,
            is_private: request.is_private,
        }
    }
}

/// The mutable fields of a post. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_private: Option<bool>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_private.is_none()
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_privacy(mut self, is_private: bool) -> Self {
        self.is_private = Some(is_private);
        self
    }
}

impl From<UpdatePostRequest> for PostUpdate {
    fn from(req: UpdatePostRequest) -> Self {
        Self { title: req.title, description: req.description, is_private: req.is_private }
    }
}

/// A validated page window: everything created at or after `start_from`, at most `limit` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start_from: DateTime<Utc>,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self { start_from: DateTime::<Utc>::default(), limit: DEFAULT_PAGE_LIMIT }
    }
}

impl Page {
    /// Applies the defaults for any missing parameter. Returns `None` if the limit is less than one.
    pub fn from_request(req: &PageRequest) -> Option<Self> {
        let default = Self::default();
        let limit = req.limit.unwrap_or(default.limit);
        if limit < 1 {
            return None;
        }
        Some(Self { start_from: req.start_from.unwrap_or(default.start_from), limit })
    }
}

/// Listing query for posts. Only posts that are public, or private and owned by `viewer`, are returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub viewer: SubjectId,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentQuery {
    pub post_id: String,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: String,
    pub user_id: SubjectId,
    pub text: String,
}

/// The state of a like after it has been toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes: i64,
}

//--------------------------------------------   Users   ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub login: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub phone_number: String,
}

/// A registration whose password has already been hashed. This is what gets stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub hashed_password: String,
    pub name: String,
    pub surname: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserCredentials {
    pub user_id: String,
    pub login: String,
    pub hashed_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub login: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() &&
            self.surname.is_none() &&
            self.date_of_birth.is_none() &&
            self.email.is_none() &&
            self.phone_number.is_none()
    }
}
