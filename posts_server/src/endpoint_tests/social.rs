use actix_web::http::StatusCode;
use chrono::{TimeZone, Utc};
use msg_common::posts_rpc::PostsMethod;
use msg_engine::db_types::{Comment, LikeStatus};
use serde_json::json;

use super::{
    helpers::{call_as, post, rpc, ALICE, BOB},
    mocks::MockPostManager,
};

fn comment(comment_id: &str, user_id: &str, text: &str) -> Comment {
    Comment {
        comment_id: comment_id.to_string(),
        post_id: "p1".to_string(),
        user_id: user_id.to_string(),
        text: text.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 2, 8, 30, 0).unwrap(),
    }
}

#[actix_web::test]
async fn view_public_post() {
    let mut db = MockPostManager::new();
    db.expect_fetch_post().returning(|id| Ok(Some(post(id, ALICE, false))));
    db.expect_record_view().withf(|id, viewer| id == "p1" && *viewer == *BOB).times(1).returning(|_, _| Ok(3));
    let (status, body) = call_as(rpc(PostsMethod::ViewPost, Some(BOB), json!({"post_id": "p1"})), db).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"post_id": "p1", "views": 3}));
}

#[actix_web::test]
async fn cannot_view_private_post_of_another_user() {
    let mut db = MockPostManager::new();
    db.expect_fetch_post().returning(|id| Ok(Some(post(id, ALICE, true))));
    db.expect_record_view().never();
    let (status, _) = call_as(rpc(PostsMethod::ViewPost, Some(BOB), json!({"post_id": "p1"})), db).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn like_toggles() {
    let mut db = MockPostManager::new();
    db.expect_fetch_post().returning(|id| Ok(Some(post(id, ALICE, false))));
    db.expect_toggle_like().times(1).returning(|_, _| Ok(LikeStatus { liked: false, likes: 0 }));
    let (status, body) = call_as(rpc(PostsMethod::LikePost, Some(BOB), json!({"post_id": "p1"})), db).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"post_id": "p1", "liked": false, "likes": 0}));
}

#[actix_web::test]
async fn like_missing_post() {
    let mut db = MockPostManager::new();
    db.expect_fetch_post().returning(|_| Ok(None));
    db.expect_toggle_like().never();
    let (status, _) = call_as(rpc(PostsMethod::LikePost, Some(BOB), json!({"post_id": "gone"})), db).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn comment_on_post() {
    let mut db = MockPostManager::new();
    db.expect_fetch_post().returning(|id| Ok(Some(post(id, ALICE, false))));
    db.expect_insert_comment()
        .withf(|c| c.post_id == "p1" && c.user_id == *BOB && c.text == "Nice")
        .times(1)
        .returning(|c| Ok(comment("c1", c.user_id.as_str(), &c.text)));
    let req = rpc(PostsMethod::CommentPost, Some(BOB), json!({"post_id": "p1", "text": "Nice"}));
    let (status, body) = call_as(req, db).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comment"]["user_id"], BOB);
    assert_eq!(body["comment"]["text"], "Nice");
}

#[actix_web::test]
async fn empty_comment_is_invalid() {
    let mut db = MockPostManager::new();
    db.expect_insert_comment().never();
    let req = rpc(PostsMethod::CommentPost, Some(BOB), json!({"post_id": "p1", "text": ""}));
    let (status, _) = call_as(req, db).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn list_comments_page() {
    let mut db = MockPostManager::new();
    db.expect_fetch_post().returning(|id| Ok(Some(post(id, ALICE, false))));
    db.expect_fetch_comments()
        .withf(|q| q.post_id == "p1" && q.page.limit == 2)
        .times(1)
        .returning(|_| Ok(vec![comment("c1", BOB, "first"), comment("c2", ALICE, "second")]));
    let req = rpc(PostsMethod::GetComments, Some(BOB), json!({"post_id": "p1", "limit": 2}));
    let (status, body) = call_as(req, db).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["comments"][0]["text"], "first");
}
