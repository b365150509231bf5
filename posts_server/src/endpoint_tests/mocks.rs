use mockall::mock;
use msg_common::SubjectId;
use msg_engine::{
    db_types::{Comment, CommentQuery, LikeStatus, NewComment, NewPost, Post, PostQuery, PostUpdate},
    traits::{PostManagement, PostStoreError},
};

mock! {
    pub PostManager {}
    impl PostManagement for PostManager {
        async fn insert_post(&self, post: NewPost) -> Result<Post, PostStoreError>;
        async fn fetch_post(&self, post_id: &str) -> Result<Option<Post>, PostStoreError>;
        async fn update_post(
            &self,
            post_id: &str,
            owner: &SubjectId,
            update: PostUpdate,
        ) -> Result<Option<Post>, PostStoreError>;
        async fn delete_post(&self, post_id: &str, owner: &SubjectId) -> Result<bool, PostStoreError>;
        async fn fetch_posts(&self, query: PostQuery) -> Result<Vec<Post>, PostStoreError>;
        async fn record_view(&self, post_id: &str, viewer: &SubjectId) -> Result<i64, PostStoreError>;
        async fn toggle_like(&self, post_id: &str, user: &SubjectId) -> Result<LikeStatus, PostStoreError>;
        async fn insert_comment(&self, comment: NewComment) -> Result<Comment, PostStoreError>;
        async fn fetch_comments(&self, query: CommentQuery) -> Result<Vec<Comment>, PostStoreError>;
    }
}
