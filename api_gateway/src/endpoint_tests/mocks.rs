use mockall::mock;
use msg_common::{
    posts_rpc::{
        CommentPostRequest,
        CommentsPage,
        CreatePostRequest,
        DeletePostResponse,
        GetCommentsRequest,
        LikePostResponse,
        PageRequest,
        PostIdRequest,
        PostsPage,
        UpdatePostRequest,
        ViewPostResponse,
    },
    SubjectId,
};

use crate::{
    identity::{IdentityError, IdentityVerifier},
    posts_client::{Comment, Post, PostsRpc, RpcError},
};

mock! {
    pub Verifier {}
    impl IdentityVerifier for Verifier {
        async fn verify(&self, credential: &str) -> Result<SubjectId, IdentityError>;
    }
}

mock! {
    pub PostsClient {}
    impl PostsRpc for PostsClient {
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
}
