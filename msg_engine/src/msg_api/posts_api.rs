//! Authorization layer for posts, likes, comments and views.
//!
//! | Operation | Rule |
//! |---|---|
//! | read, view, like, comment | the post must exist and be public, or owned by the subject |
//! | update, delete | the post must exist and be owned by the subject |
//!
//! Missing posts are reported as [`PostsApiError::NotFound`] before any permission decision is made.
use std::fmt::Debug;

use log::*;
use msg_common::{
    posts_rpc::{CommentPostRequest, CreatePostRequest, GetCommentsRequest, PageRequest, UpdatePostRequest},
    SubjectId,
};

use crate::{
    db_types::{Comment, CommentQuery, LikeStatus, NewComment, NewPost, Page, Post, PostQuery, PostUpdate},
    msg_api::errors::PostsApiError,
    traits::PostManagement,
};

pub struct PostsApi<B> {
    db: B,
}

impl<B: Debug> Debug for PostsApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PostsApi ({:?})", self.db)
    }
}

impl<B> PostsApi<B>
where B: PostManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub async fn create_post(&self, subject: &SubjectId, req: CreatePostRequest) -> Result<Post, PostsApiError> {
        if req.title.trim().is_empty() {
            return Err(PostsApiError::InvalidInput("Post title must not be empty".into()));
        }
        let post = self.db.insert_post(NewPost::new(subject.clone(), req)).await?;
        info!("📝️ {subject} created post {}", post.post_id);
        Ok(post)
    }

    pub async fn get_post(&self, subject: &SubjectId, post_id: &str) -> Result<Post, PostsApiError> {
        self.fetch_visible_post(subject, post_id).await
    }

    pub async fn update_post(&self, subject: &SubjectId, req: UpdatePostRequest) -> Result<Post, PostsApiError> {
        let post_id = req.post_id.clone();
        self.fetch_owned_post(subject, &post_id).await?;
        let update = PostUpdate::from(req);
        if update.is_empty() {
            return Err(PostsApiError::InvalidInput("No fields to update".into()));
        }
        if update.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
            return Err(PostsApiError::InvalidInput("Post title must not be empty".into()));
        }
        // The store repeats the ownership condition, so a concurrent delete shows up here as no match.
        let post = self.db.update_post(&post_id, subject, update).await?.ok_or(PostsApiError::NotFound)?;
        debug!("📝️ {subject} updated post {post_id}");
        Ok(post)
    }

    pub async fn delete_post(&self, subject: &SubjectId, post_id: &str) -> Result<(), PostsApiError> {
        self.fetch_owned_post(subject, post_id).await?;
        if !self.db.delete_post(post_id, subject).await? {
            return Err(PostsApiError::NotFound);
        }
        info!("📝️ {subject} deleted post {post_id}");
        Ok(())
    }

    /// Lists the posts visible to the subject: all public posts plus the subject's own private posts.
    pub async fn list_posts(&self, subject: &SubjectId, page: &PageRequest) -> Result<Vec<Post>, PostsApiError> {
        let page = validate_page(page)?;
        let posts = self.db.fetch_posts(PostQuery { viewer: subject.clone(), page }).await?;
        trace!("📝️ {} posts listed for {subject}", posts.len());
        Ok(posts)
    }

    pub async fn view_post(&self, subject: &SubjectId, post_id: &str) -> Result<i64, PostsApiError> {
        self.fetch_visible_post(subject, post_id).await?;
        let views = self.db.record_view(post_id, subject).await?;
        Ok(views)
    }

    pub async fn like_post(&self, subject: &SubjectId, post_id: &str) -> Result<LikeStatus, PostsApiError> {
        self.fetch_visible_post(subject, post_id).await?;
        let status = self.db.toggle_like(post_id, subject).await?;
        Ok(status)
    }

    pub async fn comment_post(&self, subject: &SubjectId, req: CommentPostRequest) -> Result<Comment, PostsApiError> {
        if req.text.trim().is_empty() {
            return Err(PostsApiError::InvalidInput("Comment text must not be empty".into()));
        }
        self.fetch_visible_post(subject, &req.post_id).await?;
        let comment =
            self.db.insert_comment(NewComment { post_id: req.post_id, user_id: subject.clone(), text: req.text }).await?;
        Ok(comment)
    }

    pub async fn get_comments(
        &self,
        subject: &SubjectId,
        req: GetCommentsRequest,
    ) -> Result<Vec<Comment>, PostsApiError> {
        let page = validate_page(&req.page)?;
        self.fetch_visible_post(subject, &req.post_id).await?;
        let comments = self.db.fetch_comments(CommentQuery { post_id: req.post_id, page }).await?;
        Ok(comments)
    }

    async fn fetch_visible_post(&self, subject: &SubjectId, post_id: &str) -> Result<Post, PostsApiError> {
        let post = self.db.fetch_post(post_id).await?.ok_or(PostsApiError::NotFound)?;
        if post.is_private && *subject != post.creator_id {
            debug!("📝️ {subject} tried to access private post {post_id}");
            return Err(PostsApiError::PermissionDenied("This post is private".into()));
        }
        Ok(post)
    }

    async fn fetch_owned_post(&self, subject: &SubjectId, post_id: &str) -> Result<Post, PostsApiError> {
        let post = self.db.fetch_post(post_id).await?.ok_or(PostsApiError::NotFound)?;
        if *subject != post.creator_id {
            debug!("📝️ {subject} tried to modify post {post_id}, owned by {}", post.creator_id);
            return Err(PostsApiError::PermissionDenied("Not your post".into()));
        }
        Ok(post)
    }
}

fn validate_page(page: &PageRequest) -> Result<Page, PostsApiError> {
    Page::from_request(page).ok_or_else(|| PostsApiError::InvalidInput("limit must be at least 1".into()))
}
