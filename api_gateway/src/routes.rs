//! Request handler definitions for the gateway.
//!
//! `/health`, `/passport/register` and `/passport/login` are public. Everything under `/posts` and
//! `/passport/me` runs behind [`crate::middleware::AuthenticationFactory`] and receives the caller as an
//! [`AuthenticatedSubject`].
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use log::*;
use msg_common::{
    posts_rpc::{CreatePostRequest, GetCommentsRequest, PostIdRequest},
    route,
};

use crate::{
    data_objects::{CommentBody, PageQuery, UpdatePostBody},
    errors::GatewayError,
    middleware::AuthenticatedSubject,
    posts_client::PostsRpc,
    proxy::PassportProxy,
};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("🚪️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Passport  ----------------------------------------------------
#[post("/passport/register")]
pub async fn passport_register(
    req: HttpRequest,
    body: web::Bytes,
    proxy: web::Data<PassportProxy>,
) -> Result<HttpResponse, GatewayError> {
    proxy.forward(&req, body, "/register", None).await
}

#[post("/passport/login")]
pub async fn passport_login(
    req: HttpRequest,
    body: web::Bytes,
    proxy: web::Data<PassportProxy>,
) -> Result<HttpResponse, GatewayError> {
    proxy.forward(&req, body, "/login", None).await
}

/// `GET` and `PUT /passport/me`, on behalf of the authenticated subject.
pub async fn passport_me(
    subject: AuthenticatedSubject,
    req: HttpRequest,
    body: web::Bytes,
    proxy: web::Data<PassportProxy>,
) -> Result<HttpResponse, GatewayError> {
    proxy.forward(&req, body, "/me", Some(&subject.0)).await
}

//----------------------------------------------   Posts  ----------------------------------------------------
route!(create_post => Post "" impl PostsRpc);
pub async fn create_post<R: PostsRpc>(
    subject: AuthenticatedSubject,
    body: web::Json<CreatePostRequest>,
    rpc: web::Data<R>,
) -> Result<HttpResponse, GatewayError> {
    let post = rpc.create_post(&subject.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

route!(list_posts => Get "" impl PostsRpc);
pub async fn list_posts<R: PostsRpc>(
    subject: AuthenticatedSubject,
    query: web::Query<PageQuery>,
    rpc: web::Data<R>,
) -> Result<HttpResponse, GatewayError> {
    let page = query.into_inner().into_page_request()?;
    let posts = rpc.get_posts(&subject.0, page).await?;
    Ok(HttpResponse::Ok().json(posts))
}

route!(get_post => Get "/{post_id}" impl PostsRpc);
pub async fn get_post<R: PostsRpc>(
    subject: AuthenticatedSubject,
    path: web::Path<String>,
    rpc: web::Data<R>,
) -> Result<HttpResponse, GatewayError> {
    let post = rpc.get_post(&subject.0, PostIdRequest::new(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(post))
}

route!(update_post => Put "/{post_id}" impl PostsRpc);
pub async fn update_post<R: PostsRpc>(
    subject: AuthenticatedSubject,
    path: web::Path<String>,
    body: web::Json<UpdatePostBody>,
    rpc: web::Data<R>,
) -> Result<HttpResponse, GatewayError> {
    let request = body.into_inner().for_post(path.into_inner());
    let post = rpc.update_post(&subject.0, request).await?;
    Ok(HttpResponse::Ok().json(post))
}

route!(delete_post => Delete "/{post_id}" impl PostsRpc);
pub async fn delete_post<R: PostsRpc>(
    subject: AuthenticatedSubject,
    path: web::Path<String>,
    rpc: web::Data<R>,
) -> Result<HttpResponse, GatewayError> {
    let result = rpc.delete_post(&subject.0, PostIdRequest::new(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(result))
}

//----------------------------------------------   Social  ----------------------------------------------------
route!(view_post => Get "/{post_id}/view" impl PostsRpc);
pub async fn view_post<R: PostsRpc>(
    subject: AuthenticatedSubject,
    path: web::Path<String>,
    rpc: web::Data<R>,
) -> Result<HttpResponse, GatewayError> {
    let views = rpc.view_post(&subject.0, PostIdRequest::new(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(views))
}

route!(like_post => Post "/{post_id}/like" impl PostsRpc);
pub async fn like_post<R: PostsRpc>(
    subject: AuthenticatedSubject,
    path: web::Path<String>,
    rpc: web::Data<R>,
) -> Result<HttpResponse, GatewayError> {
    let likes = rpc.like_post(&subject.0, PostIdRequest::new(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(likes))
}

route!(comment_post => Post "/{post_id}/comment" impl PostsRpc);
pub async fn comment_post<R: PostsRpc>(
    subject: AuthenticatedSubject,
    path: web::Path<String>,
    body: web::Json<CommentBody>,
    rpc: web::Data<R>,
) -> Result<HttpResponse, GatewayError> {
    let comment = rpc.comment_post(&subject.0, body.into_inner().for_post(path.into_inner())).await?;
    Ok(HttpResponse::Created().json(comment))
}

route!(list_comments => Get "/{post_id}/comments" impl PostsRpc);
pub async fn list_comments<R: PostsRpc>(
    subject: AuthenticatedSubject,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    rpc: web::Data<R>,
) -> Result<HttpResponse, GatewayError> {
    let page = query.into_inner().into_page_request()?;
    let request = GetCommentsRequest { post_id: path.into_inner(), page };
    let comments = rpc.get_comments(&subject.0, request).await?;
    Ok(HttpResponse::Ok().json(comments))
}
