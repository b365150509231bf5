//! Client side of the posts RPC interface.
//!
//! Every call carries the authenticated subject as `actor_user_id` metadata, signed when the gateway holds an
//! internal secret. Calls are bounded by a timeout and never retried.
use std::time::Duration;

use log::*;
use msg_common::{
    posts_rpc::{
        CommentPostRequest,
        CommentResponse,
        CommentsPage,
        CreatePostRequest,
        DeletePostResponse,
        GetCommentsRequest,
        LikePostResponse,
        PageRequest,
        PostIdRequest,
        PostResponse,
        PostsMethod,
        PostsPage,
        UpdatePostRequest,
        ViewPostResponse,
    },
    trust::{ACTOR_METADATA_KEY, SUBJECT_SIGNATURE_HEADER},
    ErrorCategory,
    ErrorResponse,
    SubjectId,
    TrustConfig,
};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub use msg_common::posts_rpc::{Comment, Post};

#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// The posts service answered with an error of the given category.
    #[error("{message}")]
    Status { category: ErrorCategory, message: String },
    #[error("{0} call timed out")]
    Timeout(PostsMethod),
    #[error("Could not reach the posts service. {0}")]
    Transport(String),
    #[error("Unexpected response from the posts service. {0}")]
    Decode(String),
    #[error("Could not sign the subject assertion. {0}")]
    Signing(String),
}

impl RpcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Status { category, .. } => *category,
            _ => ErrorCategory::Internal,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait PostsRpc {
    async fn create_post(&self, actor: &SubjectId, request: CreatePostRequest) -> Result<Post, RpcError>;
    async fn get_post(&self, actor: &SubjectId, request: PostIdRequest) -> Result<Post, RpcError>;
    async fn update_post(&self, actor: &SubjectId, request: UpdatePostRequest) -> Result<Post, RpcError>;
    async fn delete_post(&self, actor: &SubjectId, request: PostIdRequest) -> Result<DeletePostResponse, RpcError>;
    async fn get_posts(&self, actor: &SubjectId, request: PageRequest) -> Result<PostsPage, RpcError>;
    async fn view_post(&self, actor: &SubjectId, request: PostIdRequest) -> Result<ViewPostResponse, RpcError>;
    async fn like_post(&self, actor: &SubjectId, request: PostIdRequest) -> Result<LikePostResponse, RpcError>;
    async fn comment_post(&self, actor: &SubjectId, request: CommentPostRequest) -> Result<Comment, RpcError>;
    async fn get_comments(&self, actor: &SubjectId, request: GetCommentsRequest) -> Result<CommentsPage, RpcError>;
}

#[derive(Debug, Clone)]
pub struct HttpPostsClient {
    client: reqwest::Client,
    base_url: String,
    trust: TrustConfig,
}

impl HttpPostsClient {
    pub fn new(base_url: &str, timeout: Duration, trust: TrustConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: base_url.to_string(), trust })
    }

    async fn call<Req, Resp>(&self, method: PostsMethod, actor: &SubjectId, request: &Req) -> Result<Resp, RpcError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, method.path());
        let mut builder = self.client.post(url).header(ACTOR_METADATA_KEY, actor.as_str()).json(request);
        if let Some(signature) = self.trust.sign(actor).map_err(|e| RpcError::Signing(e.to_string()))? {
            builder = builder.header(SUBJECT_SIGNATURE_HEADER, signature);
        }
        trace!("🚪️ {method} on behalf of {actor}");
        let response = builder.send().await.map_err(|e| transport_error(method, e))?;
        let status = response.status();
        if status.is_success() {
            return response.json::<Resp>().await.map_err(|e| RpcError::Decode(e.to_string()));
        }
        let body = response.bytes().await.map_err(|e| transport_error(method, e))?;
        let err = match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(e) => RpcError::Status { category: e.category, message: e.error },
            Err(_) => RpcError::Status {
                category: ErrorCategory::from_http_status(status.as_u16()),
                message: String::from_utf8_lossy(&body).into_owned(),
            },
        };
        debug!("🚪️ {method} for {actor} failed. {err}");
        Err(err)
    }
}

fn transport_error(method: PostsMethod, e: reqwest::Error) -> RpcError {
    if e.is_timeout() {
        RpcError::Timeout(method)
    } else {
        RpcError::Transport(e.to_string())
    }
}

impl PostsRpc for HttpPostsClient {
    async fn create_post(&self, actor: &SubjectId, request: CreatePostRequest) -> Result<Post, RpcError> {
        let res: PostResponse = self.call(PostsMethod::CreatePost, actor, &request).await?;
        Ok(res.post)
    }

    async fn get_post(&self, actor: &SubjectId, request: PostIdRequest) -> Result<Post, RpcError> {
        let res: PostResponse = self.call(PostsMethod::GetPostById, actor, &request).await?;
        Ok(res.post)
    }

    async fn update_post(&self, actor: &SubjectId, request: UpdatePostRequest) -> Result<Post, RpcError> {
        let res: PostResponse = self.call(PostsMethod::UpdatePost, actor, &request).await?;
        Ok(res.post)
    }

    async fn delete_post(&self, actor: &SubjectId, request: PostIdRequest) -> Result<DeletePostResponse, RpcError> {
        self.call(PostsMethod::DeletePost, actor, &request).await
    }

    async fn get_posts(&self, actor: &SubjectId, request: PageRequest) -> Result<PostsPage, RpcError> {
        self.call(PostsMethod::GetPosts, actor, &request).await
    }

    async fn view_post(&self, actor: &SubjectId, request: PostIdRequest) -> Result<ViewPostResponse, RpcError> {
        self.call(PostsMethod::ViewPost, actor, &request).await
    }

    async fn like_post(&self, actor: &SubjectId, request: PostIdRequest) -> Result<LikePostResponse, RpcError> {
        self.call(PostsMethod::LikePost, actor, &request).await
    }

    async fn comment_post(&self, actor: &SubjectId, request: CommentPostRequest) -> Result<Comment, RpcError> {
        let res: CommentResponse = self.call(PostsMethod::CommentPost, actor, &request).await?;
        Ok(res.comment)
    }

    async fn get_comments(&self, actor: &SubjectId, request: GetCommentsRequest) -> Result<CommentsPage, RpcError> {
        self.call(PostsMethod::GetComments, actor, &request).await
    }
}
