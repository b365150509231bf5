use chrono::{DateTime, Utc};
use msg_common::posts_rpc::{CommentPostRequest, PageRequest, UpdatePostRequest};
use serde::{Deserialize, Serialize};

use crate::errors::GatewayError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckTokenResponse {
    pub user_id: String,
}

/// The paging parameters of a listing, as they arrive in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub start_from: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    /// `start_from` must be an RFC 3339 timestamp and `limit` an integer. Range checks are left to the posts service.
    pub fn into_page_request(self) -> Result<PageRequest, GatewayError> {
        let start_from = self
            .start_from
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                DateTime::parse_from_rfc3339(s.trim())
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| GatewayError::InvalidInput(format!("start_from is not an RFC 3339 timestamp. {e}")))
            })
            .transpose()?;
        let limit = self
            .limit
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim().parse::<i64>().map_err(|e| GatewayError::InvalidInput(format!("limit is not an integer. {e}")))
            })
            .transpose()?;
        Ok(PageRequest { start_from, limit })
    }
}

/// Body of `PUT /posts/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_private: Option<bool>,
}

impl UpdatePostBody {
    pub fn for_post(self, post_id: String) -> UpdatePostRequest {
        UpdatePostRequest { post_id, title: self.title, description: self.description, is_private: self.is_private }
    }
}

/// Body of `POST /posts/{id}/comment`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentBody {
    pub text: String,
}

impl CommentBody {
    pub fn for_post(self, post_id: String) -> CommentPostRequest {
        CommentPostRequest { post_id, text: self.text }
    }
}
