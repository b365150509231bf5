use std::{rc::Rc, time::Duration};

use actix_web::{body::to_bytes, http::StatusCode, test, test::TestRequest, App};
use chrono::{TimeZone, Utc};
use msg_common::{SubjectId, TrustConfig};
use serde_json::Value;

use super::mocks::{MockPostsClient, MockVerifier};
use crate::{identity::IdentityError, posts_client::Post, proxy::PassportProxy, server::configure_gateway};

pub const ALICE: &str = "alice";
pub const ALICE_TOKEN: &str = "alice-token";

/// A verifier that knows a single credential, [`ALICE_TOKEN`].
pub fn verifier() -> MockVerifier {
    let mut verifier = MockVerifier::new();
    verifier.expect_verify().returning(|credential| {
        if credential == ALICE_TOKEN {
            Ok(SubjectId::new(ALICE).unwrap())
        } else {
            Err(IdentityError::Rejected(401))
        }
    });
    verifier
}

/// A verifier that fails the test if it is ever consulted.
pub fn unused_verifier() -> MockVerifier {
    let mut verifier = MockVerifier::new();
    verifier.expect_verify().never();
    verifier
}

pub fn proxy_to(base_url: &str) -> PassportProxy {
    PassportProxy::new(base_url, Duration::from_secs(2), TrustConfig::default()).unwrap()
}

pub fn post(post_id: &str, creator_id: &str) -> Post {
    let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    Post {
        post_id: post_id.to_string(),
        title: "Hello".to_string(),
        description: "World".to_string(),
        creator_id: creator_id.to_string(),
        is_private: false,
        created_at,
        updated_at: created_at,
    }
}

pub async fn send_with_proxy(
    req: TestRequest,
    verifier: MockVerifier,
    posts: MockPostsClient,
    proxy: PassportProxy,
) -> (StatusCode, Value) {
    let app = App::new().configure(|cfg| configure_gateway(cfg, Rc::new(verifier), posts, proxy));
    let service = test::init_service(app).await;
    // Middleware rejections come back as service errors. A live server renders them with `error_response`.
    let (status, bytes) = match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => (res.status(), test::read_body(res).await),
        Err(e) => {
            let res = e.error_response();
            (res.status(), to_bytes(res.into_body()).await.unwrap_or_default())
        },
    };
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Sends the request through the gateway. Passport calls go nowhere.
pub async fn send(req: TestRequest, verifier: MockVerifier, posts: MockPostsClient) -> (StatusCode, Value) {
    send_with_proxy(req, verifier, posts, proxy_to("http://127.0.0.1:9")).await
}

pub fn authed(req: TestRequest) -> TestRequest {
    req.insert_header(("Authorization", format!("Bearer {ALICE_TOKEN}")))
}
