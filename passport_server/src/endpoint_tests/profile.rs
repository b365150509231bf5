use actix_web::{http::StatusCode, test::TestRequest, web::ServiceConfig};
use msg_common::{trust::sign_subject, Secret, SubjectId, TrustConfig};
use msg_engine::db_types::UserProfile;
use serde_json::json;

use super::{
    helpers::{configure_app, send},
    mocks::MockUserManager,
};
use crate::routes::{MyProfileRoute, UpdateMyProfileRoute};

fn configure(users: MockUserManager, trust: TrustConfig) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        configure_app(cfg, users, trust);
        cfg.service(MyProfileRoute::<MockUserManager>::new()).service(UpdateMyProfileRoute::<MockUserManager>::new());
    }
}

fn profile() -> UserProfile {
    UserProfile {
        login: "ada".into(),
        email: "ada@example.com".into(),
        name: "Ada".into(),
        surname: "Lovelace".into(),
        date_of_birth: None,
        phone_number: String::new(),
    }
}

#[actix_web::test]
async fn me_requires_an_assertion() {
    let users = MockUserManager::new();
    let (status, body) = send(TestRequest::get().uri("/me"), configure(users, TrustConfig::default())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("unauthenticated"));
}

#[actix_web::test]
async fn me_reads_the_asserted_user() {
    let mut users = MockUserManager::new();
    users.expect_fetch_profile().withf(|id| id == "user-1").times(1).returning(|_| Ok(Some(profile())));
    let req = TestRequest::get().uri("/me").insert_header(("X-User-Id", "user-1"));
    let (status, body) = send(req, configure(users, TrustConfig::default())).await;
    assert_eq!(status, StatusCode::OK);
    let body: UserProfile = serde_json::from_str(&body).unwrap();
    assert_eq!(body, profile());
}

#[actix_web::test]
async fn me_for_unknown_user() {
    let mut users = MockUserManager::new();
    users.expect_fetch_profile().returning(|_| Ok(None));
    let req = TestRequest::get().uri("/me").insert_header(("X-User-Id", "ghost"));
    let (status, _) = send(req, configure(users, TrustConfig::default())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn signed_assertions_are_enforced() {
    let secret = Secret::new("internal".to_string());
    let trust = TrustConfig::new(Some(secret.clone()));
    let unsigned = TestRequest::get().uri("/me").insert_header(("X-User-Id", "user-1"));
    let (status, _) = send(unsigned, configure(MockUserManager::new(), trust.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut users = MockUserManager::new();
    users.expect_fetch_profile().times(1).returning(|_| Ok(Some(profile())));
    let sig = sign_subject(&secret, &SubjectId::new("user-1").unwrap()).unwrap();
    let signed =
        TestRequest::get().uri("/me").insert_header(("X-User-Id", "user-1")).insert_header(("X-Subject-Signature", sig));
    let (status, _) = send(signed, configure(users, trust)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn update_me() {
    let mut users = MockUserManager::new();
    users
        .expect_update_profile()
        .withf(|id, update| id == "user-1" && update.name.as_deref() == Some("Augusta") && update.surname.is_none())
        .times(1)
        .returning(|_, _| Ok(true));
    let req = TestRequest::put().uri("/me").insert_header(("X-User-Id", "user-1")).set_json(json!({"name": "Augusta"}));
    let (status, body) = send(req, configure(users, TrustConfig::default())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"User updated successfully"}"#);
}
