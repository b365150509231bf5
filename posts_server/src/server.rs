use std::time::Duration;

use actix_web::{dev::Server, error::JsonPayloadError, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use msg_common::TrustConfig;
use msg_engine::{traits::PostManagement, PostsApi, SqliteDatabase};

use crate::{
    config::PostsConfig,
    errors::ServerError,
    routes::{
        health,
        CommentPostRoute,
        CreatePostRoute,
        DeletePostRoute,
        GetCommentsRoute,
        GetPostByIdRoute,
        GetPostsRoute,
        LikePostRoute,
        UpdatePostRoute,
        ViewPostRoute,
    },
};

pub async fn run_server(config: PostsConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::connect_with_retries(&config.database_url, 25, config.db_retry)
        .await
        .map_err(|e| ServerError::InitializeError(format!("Could not connect to the database. {e}")))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(format!("Could not run migrations. {e}")))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(ServerError::from)
}

pub fn create_server_instance(config: PostsConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    info!("🚀️ Posts RPC listening on {}:{}", config.host, config.port);
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %U").log_target("posts::access_log"))
            .configure(|cfg| configure_rpc(cfg, PostsApi::new(db.clone()), config.trust.clone()))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers every RPC method against `api`.
pub fn configure_rpc<B: PostManagement + 'static>(cfg: &mut web::ServiceConfig, api: PostsApi<B>, trust: TrustConfig) {
    cfg.app_data(json_config())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(trust))
        .service(health)
        .service(CreatePostRoute::<B>::new())
        .service(GetPostByIdRoute::<B>::new())
        .service(UpdatePostRoute::<B>::new())
        .service(DeletePostRoute::<B>::new())
        .service(GetPostsRoute::<B>::new())
        .service(ViewPostRoute::<B>::new())
        .service(LikePostRoute::<B>::new())
        .service(CommentPostRoute::<B>::new())
        .service(GetCommentsRoute::<B>::new());
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        debug!("💻️ Rejected request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}
