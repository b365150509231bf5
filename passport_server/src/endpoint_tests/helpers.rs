use actix_web::{http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use msg_common::{Secret, TrustConfig};
use msg_engine::{events::EventProducers, PassportApi};

use super::mocks::MockUserManager;
use crate::{auth::TokenIssuer, config::AuthConfig, server::json_config};

pub const TEST_JWT_SECRET: &str = "endpoint-test-secret";

pub fn issuer() -> TokenIssuer {
    TokenIssuer::new(&AuthConfig::new(Secret::new(TEST_JWT_SECRET.to_string()), chrono::Duration::hours(1)))
}

/// Registers the api, a token issuer and the trust settings the way the server does.
pub fn configure_app(cfg: &mut ServiceConfig, users: MockUserManager, trust: TrustConfig) {
    cfg.app_data(json_config())
        .app_data(web::Data::new(PassportApi::new(users, EventProducers::default())))
        .app_data(web::Data::new(issuer()))
        .app_data(web::Data::new(trust));
}

pub async fn send(req: TestRequest, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}
