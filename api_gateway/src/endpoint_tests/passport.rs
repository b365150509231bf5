use std::collections::BTreeMap;

use actix_web::{http::StatusCode, test::TestRequest, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use super::{
    helpers::{authed, proxy_to, send_with_proxy, unused_verifier, verifier, ALICE},
    mocks::MockPostsClient,
};

/// Answers every request with a description of what it received.
async fn echo(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let headers = req
        .headers()
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect::<BTreeMap<_, _>>();
    let status = if req.path() == "/login" { StatusCode::UNAUTHORIZED } else { StatusCode::OK };
    HttpResponse::build(status).json(json!({
        "method": req.method().as_str(),
        "path": req.path(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

/// Starts the echo server on a random local port and returns its base URL.
fn start_echo_server() -> (String, actix_web::dev::ServerHandle) {
    let server = HttpServer::new(|| App::new().default_service(web::to(echo)))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{addr}"), handle)
}

#[actix_web::test]
async fn register_is_forwarded_unchanged() {
    let (url, handle) = start_echo_server();
    let req = TestRequest::post()
        .uri("/passport/register")
        .insert_header(("X-Request-Tag", "abc"))
        .set_json(json!({"login": "ada", "password": "pw"}));
    let (status, body) = send_with_proxy(req, unused_verifier(), MockPostsClient::new(), proxy_to(&url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "POST");
    assert_eq!(body["path"], "/register");
    assert_eq!(body["headers"]["x-request-tag"], "abc");
    let sent: Value = serde_json::from_str(body["body"].as_str().unwrap()).unwrap();
    assert_eq!(sent, json!({"login": "ada", "password": "pw"}));
    handle.stop(false).await;
}

#[actix_web::test]
async fn upstream_status_is_relayed() {
    let (url, handle) = start_echo_server();
    let req = TestRequest::post().uri("/passport/login").set_json(json!({"login": "ada", "password": "nope"}));
    let (status, body) = send_with_proxy(req, unused_verifier(), MockPostsClient::new(), proxy_to(&url)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["path"], "/login");
    handle.stop(false).await;
}

#[actix_web::test]
async fn me_carries_the_subject_instead_of_the_credential() {
    let (url, handle) = start_echo_server();
    let req = authed(TestRequest::put().uri("/passport/me"))
        .insert_header(("X-User-Id", "mallory"))
        .insert_header(("X-Subject-Signature", "forged"))
        .set_json(json!({"name": "Ada"}));
    let (status, body) = send_with_proxy(req, verifier(), MockPostsClient::new(), proxy_to(&url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["path"], "/me");
    assert_eq!(body["headers"]["x-user-id"], ALICE);
    assert!(body["headers"].get("authorization").is_none());
    assert!(body["headers"].get("x-subject-signature").is_none());
    handle.stop(false).await;
}

#[actix_web::test]
async fn unreachable_passport_is_internal() {
    let req = TestRequest::post().uri("/passport/login").set_json(json!({"login": "ada", "password": "pw"}));
    let (status, body) =
        send_with_proxy(req, unused_verifier(), MockPostsClient::new(), proxy_to("http://127.0.0.1:9")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["category"], "internal");
}
