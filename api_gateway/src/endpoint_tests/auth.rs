use actix_web::{http::StatusCode, test::TestRequest};
use msg_common::posts_rpc::PostsPage;
use serde_json::json;

use super::{
    helpers::{authed, send, unused_verifier, verifier, ALICE},
    mocks::MockPostsClient,
};

fn protected_routes() -> Vec<TestRequest> {
    vec![
        TestRequest::post().uri("/posts").set_json(json!({"title": "t", "is_private": false})),
        TestRequest::get().uri("/posts"),
        TestRequest::get().uri("/posts/p1"),
        TestRequest::put().uri("/posts/p1").set_json(json!({"title": "t"})),
        TestRequest::delete().uri("/posts/p1"),
        TestRequest::get().uri("/posts/p1/view"),
        TestRequest::post().uri("/posts/p1/like"),
        TestRequest::post().uri("/posts/p1/comment").set_json(json!({"text": "hi"})),
        TestRequest::get().uri("/posts/p1/comments"),
        TestRequest::get().uri("/passport/me"),
        TestRequest::put().uri("/passport/me").set_json(json!({"name": "Ada"})),
    ]
}

#[actix_web::test]
async fn missing_credential_never_reaches_a_backend() {
    for req in protected_routes() {
        let (status, body) = send(req, unused_verifier(), MockPostsClient::new()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["category"], "unauthenticated");
    }
}

#[actix_web::test]
async fn empty_credential_is_missing() {
    for value in ["", "   ", "Bearer "] {
        let req = TestRequest::get().uri("/posts").insert_header(("Authorization", value));
        let (status, _) = send(req, unused_verifier(), MockPostsClient::new()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{value:?}");
    }
}

#[actix_web::test]
async fn rejected_credential_never_reaches_a_backend() {
    for req in protected_routes() {
        let req = req.insert_header(("Authorization", "Bearer garbage"));
        let (status, body) = send(req, verifier(), MockPostsClient::new()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"category": "unauthenticated", "error": "Missing, invalid or expired credential"}));
    }
}

#[actix_web::test]
async fn raw_and_bearer_credentials_are_accepted() {
    for value in ["alice-token", "Bearer alice-token", "bearer alice-token"] {
        let mut posts = MockPostsClient::new();
        posts
            .expect_get_posts()
            .withf(|actor, _| *actor == *ALICE)
            .times(1)
            .returning(|_, _| Ok(PostsPage { posts: vec![], total_count: 0 }));
        let req = TestRequest::get().uri("/posts").insert_header(("Authorization", value));
        let (status, body) = send(req, verifier(), posts).await;
        assert_eq!(status, StatusCode::OK, "{value}");
        assert_eq!(body, json!({"posts": [], "total_count": 0}));
    }
}

#[actix_web::test]
async fn public_routes_need_no_credential() {
    let (status, _) = send(TestRequest::get().uri("/health"), unused_verifier(), MockPostsClient::new()).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn unknown_routes_are_not_found() {
    let req = authed(TestRequest::get().uri("/nowhere"));
    let (status, _) = send(req, unused_verifier(), MockPostsClient::new()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
