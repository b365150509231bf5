use std::{rc::Rc, time::Duration};

use actix_web::{
    dev::Server,
    error::{JsonPayloadError, QueryPayloadError},
    http::KeepAlive,
    middleware::Logger,
    web,
    App,
    HttpServer,
};
use log::*;

use crate::{
    config::GatewayConfig,
    errors::GatewayError,
    identity::{IdentityVerifier, PassportVerifier},
    middleware::AuthenticationFactory,
    posts_client::{HttpPostsClient, PostsRpc},
    proxy::PassportProxy,
    routes::{
        health,
        passport_login,
        passport_me,
        passport_register,
        CommentPostRoute,
        CreatePostRoute,
        DeletePostRoute,
        GetPostRoute,
        LikePostRoute,
        ListCommentsRoute,
        ListPostsRoute,
        UpdatePostRoute,
        ViewPostRoute,
    },
};

pub async fn run_server(config: GatewayConfig) -> Result<(), GatewayError> {
    let srv = create_server_instance(config)?;
    srv.await.map_err(GatewayError::from)
}

pub fn create_server_instance(config: GatewayConfig) -> Result<Server, GatewayError> {
    let init_error = |e: reqwest::Error| GatewayError::InitializeError(format!("Could not build an HTTP client. {e}"));
    let verifier = PassportVerifier::new(&config.passport_url, config.rpc_timeout).map_err(init_error)?;
    let posts = HttpPostsClient::new(&config.posts_rpc_url, config.rpc_timeout, config.trust.clone())
        .map_err(init_error)?;
    let proxy =
        PassportProxy::new(&config.passport_url, config.rpc_timeout, config.trust.clone()).map_err(init_error)?;
    info!(
        "🚀️ Gateway listening on {}:{}. Passport at {}, posts RPC at {}",
        config.host, config.port, config.passport_url, config.posts_rpc_url
    );
    let srv = HttpServer::new(move || {
        let verifier = Rc::new(verifier.clone());
        let posts = posts.clone();
        let proxy = proxy.clone();
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("gateway::access_log"))
            .configure(|cfg| configure_gateway(cfg, verifier, posts, proxy))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers the public routes, and the protected ones behind the authentication middleware.
pub fn configure_gateway<V, R>(cfg: &mut web::ServiceConfig, verifier: Rc<V>, posts: R, proxy: PassportProxy)
where
    V: IdentityVerifier + 'static,
    R: PostsRpc + 'static,
{
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(web::Data::new(posts))
        .app_data(web::Data::new(proxy))
        .service(health)
        .service(passport_register)
        .service(passport_login)
        .service(
            web::resource("/passport/me")
                .wrap(AuthenticationFactory::new(Rc::clone(&verifier)))
                .route(web::get().to(passport_me))
                .route(web::put().to(passport_me)),
        )
        .service(
            web::scope("/posts")
                .wrap(AuthenticationFactory::new(verifier))
                .service(CreatePostRoute::<R>::new())
                .service(ListPostsRoute::<R>::new())
                .service(GetPostRoute::<R>::new())
                .service(UpdatePostRoute::<R>::new())
                .service(DeletePostRoute::<R>::new())
                .service(ViewPostRoute::<R>::new())
                .service(LikePostRoute::<R>::new())
                .service(CommentPostRoute::<R>::new())
                .service(ListCommentsRoute::<R>::new()),
        );
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        debug!("🚪️ Rejected request body. {err}");
        GatewayError::InvalidInput(format!("Invalid JSON. {err}")).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req| {
        debug!("🚪️ Rejected query string. {err}");
        GatewayError::InvalidInput(err.to_string()).into()
    })
}
