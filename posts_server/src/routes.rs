//! The posts RPC surface. Every method is `POST /rpc/<Method>` with a JSON request object and runs on behalf of the
//! [`Actor`] named in the call metadata.
use actix_web::{get, web, HttpResponse, Responder};
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
        PostsPage,
        UpdatePostRequest,
        ViewPostResponse,
    },
    route,
};
use msg_engine::{traits::PostManagement, PostsApi};

use crate::{actor::Actor, errors::ServerError};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Posts  ----------------------------------------------------
route!(create_post => Post "/rpc/CreatePost" impl PostManagement);
pub async fn create_post<B: PostManagement>(
    actor: Actor,
    body: web::Json<CreatePostRequest>,
    api: web::Data<PostsApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Actor(subject) = actor;
    let post = api.create_post(&subject, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse { post }))
}

route!(get_post_by_id => Post "/rpc/GetPostById" impl PostManagement);
pub async fn get_post_by_id<B: PostManagement>(
    actor: Actor,
    body: web::Json<PostIdRequest>,
    api: web::Data<PostsApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Actor(subject) = actor;
    trace!("💻️ GetPostById {} for {subject}", body.post_id);
    let post = api.get_post(&subject, &body.post_id).await?;
    Ok(HttpResponse::Ok().json(PostResponse { post }))
}

route!(update_post => Post "/rpc/UpdatePost" impl PostManagement);
pub async fn update_post<B: PostManagement>(
    actor: Actor,
    body: web::Json<UpdatePostRequest>,
    api: web::Data<PostsApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Actor(subject) = actor;
    let post = api.update_post(&subject, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse { post }))
}

route!(delete_post => Post "/rpc/DeletePost" impl PostManagement);
pub async fn delete_post<B: PostManagement>(
    actor: Actor,
    body: web::Json<PostIdRequest>,
    api: web::Data<PostsApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Actor(subject) = actor;
    api.delete_post(&subject, &body.post_id).await?;
    Ok(HttpResponse::Ok().json(DeletePostResponse { success: true }))
}

route!(get_posts => Post "/rpc/GetPosts" impl PostManagement);
pub async fn get_posts<B: PostManagement>(
    actor: Actor,
    body: web::Json<PageRequest>,
    api: web::Data<PostsApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Actor(subject) = actor;
    let posts = api.list_posts(&subject, &body).await?;
    let total_count = posts.len() as i64;
    Ok(HttpResponse::Ok().json(PostsPage { posts, total_count }))
}

//----------------------------------------------   Social  ----------------------------------------------------
route!(view_post => Post "/rpc/ViewPost" impl PostManagement);
pub async fn view_post<B: PostManagement>(
    actor: Actor,
    body: web::Json<PostIdRequest>,
    api: web::Data<PostsApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Actor(subject) = actor;
    let PostIdRequest { post_id } = body.into_inner();
    let views = api.view_post(&subject, &post_id).await?;
    Ok(HttpResponse::Ok().json(ViewPostResponse { post_id, views }))
}

route!(like_post => Post "/rpc/LikePost" impl PostManagement);
pub async fn like_post<B: PostManagement>(
    actor: Actor,
    body: web::Json<PostIdRequest>,
    api: web::Data<PostsApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Actor(subject) = actor;
    let PostIdRequest { post_id } = body.into_inner();
    let status = api.like_post(&subject, &post_id).await?;
    Ok(HttpResponse::Ok().json(LikePostResponse { post_id, liked: status.liked, likes: status.likes }))
}

route!(comment_post => Post "/rpc/CommentPost" impl PostManagement);
pub async fn comment_post<B: PostManagement>(
    actor: Actor,
    body: web::Json<CommentPostRequest>,
    api: web::Data<PostsApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Actor(subject) = actor;
    let comment = api.comment_post(&subject, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CommentResponse { comment }))
}

route!(get_comments => Post "/rpc/GetComments" impl PostManagement);
pub async fn get_comments<B: PostManagement>(
    actor: Actor,
    body: web::Json<GetCommentsRequest>,
    api: web::Data<PostsApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Actor(subject) = actor;
    let comments = api.get_comments(&subject, body.into_inner()).await?;
    let total_count = comments.len() as i64;
    Ok(HttpResponse::Ok().json(CommentsPage { comments, total_count }))
}
