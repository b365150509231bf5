//! Request handler definitions for the passport service.
//!
//! `/register`, `/login` and `/check_token` are public. `/me` trusts the `X-User-Id` assertion attached by the
//! gateway and never looks at a credential.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use msg_common::route;
use msg_engine::{
    db_types::{ProfileUpdate, Registration},
    traits::UserManagement,
    PassportApi,
};

use crate::{
    auth::TokenIssuer,
    data_objects::{CheckTokenRequest, CheckTokenResponse, LoginRequest, LoginResponse, StatusResponse},
    errors::ServerError,
    subject::AssertedSubject,
};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Accounts  ----------------------------------------------------
route!(register => Post "/register" impl UserManagement);
pub async fn register<B: UserManagement>(
    body: web::Json<Registration>,
    api: web::Data<PassportApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let registration = body.into_inner();
    debug!("💻️ Registration request for {}", registration.login);
    api.register(registration).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::new("User registered successfully")))
}

route!(login => Post "/login" impl UserManagement);
pub async fn login<B: UserManagement>(
    body: web::Json<LoginRequest>,
    api: web::Data<PassportApi<B>>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let LoginRequest { login, password } = body.into_inner();
    debug!("💻️ Login request for {login}");
    let user_id = api.authenticate(&login, &password).await?;
    let token = issuer.issue_token(&user_id)?;
    Ok(HttpResponse::Ok().json(LoginResponse { token, user_id }))
}

/// The identity verifier used by the gateway. Returns the user id the credential was issued to.
#[get("/check_token")]
pub async fn check_token(
    body: web::Json<CheckTokenRequest>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let claims = issuer.verify(&body.token).map_err(|e| {
        debug!("💻️ Token rejected. {e}");
        e
    })?;
    trace!("💻️ Token is valid for {}", claims.user_id);
    Ok(HttpResponse::Ok().json(CheckTokenResponse { user_id: claims.user_id }))
}

//----------------------------------------------   Profile  ----------------------------------------------------
route!(my_profile => Get "/me" impl UserManagement);
pub async fn my_profile<B: UserManagement>(
    subject: AssertedSubject,
    api: web::Data<PassportApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let AssertedSubject(user_id) = subject;
    debug!("💻️ GET profile for {user_id}");
    let profile = api.profile(user_id.as_str()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

route!(update_my_profile => Put "/me" impl UserManagement);
pub async fn update_my_profile<B: UserManagement>(
    subject: AssertedSubject,
    body: web::Json<ProfileUpdate>,
    api: web::Data<PassportApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let AssertedSubject(user_id) = subject;
    debug!("💻️ PUT profile for {user_id}");
    api.update_profile(user_id.as_str(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::new("User updated successfully")))
}
