use std::time::Duration;

use actix_web::{dev::Server, error::JsonPayloadError, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use msg_engine::{
    events::{EventHandlers, EventProducers},
    PassportApi,
    SqliteDatabase,
};

use crate::{
    auth::TokenIssuer,
    config::PassportConfig,
    errors::ServerError,
    events::registration_hooks,
    routes::{check_token, health, LoginRoute, MyProfileRoute, RegisterRoute, UpdateMyProfileRoute},
};

pub async fn run_server(config: PassportConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::connect_with_retries(&config.database_url, 25, config.db_retry)
        .await
        .map_err(|e| ServerError::InitializeError(format!("Could not connect to the database. {e}")))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(format!("Could not run migrations. {e}")))?;
    let handlers = EventHandlers::new(128, registration_hooks(&config.events));
    let producers = handlers.producers();
    handlers.start_handlers();
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(ServerError::from)
}

pub fn create_server_instance(
    config: PassportConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    info!("🚀️ Passport listening on {}:{}", config.host, config.port);
    let srv = HttpServer::new(move || {
        let passport_api = PassportApi::new(db.clone(), producers.clone());
        let issuer = TokenIssuer::new(&config.auth);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("passport::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(passport_api))
            .app_data(web::Data::new(issuer))
            .app_data(web::Data::new(config.trust.clone()))
            .service(health)
            .service(check_token)
            .service(RegisterRoute::<SqliteDatabase>::new())
            .service(LoginRoute::<SqliteDatabase>::new())
            .service(MyProfileRoute::<SqliteDatabase>::new())
            .service(UpdateMyProfileRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Malformed bodies are client errors and get the same JSON error shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        debug!("💻️ Rejected request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}
