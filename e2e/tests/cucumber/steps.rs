use std::str::FromStr;

use cucumber::{gherkin::Step, given, then, when};
use e2e::helpers::json_is_subset_of;
use log::*;
use reqwest::Method;
use serde_json::{json, Value};

use crate::cucumber::MsgWorld;

fn login_for(user: &str) -> String {
    user.to_lowercase()
}

//----------------------------------------------   Setup  ----------------------------------------------------
#[given("the platform is running")]
async fn platform_is_running(world: &mut MsgWorld) {
    world.start_platform().await;
}

#[given("the platform is running with signed assertions")]
async fn platform_with_signed_assertions(world: &mut MsgWorld) {
    world.share_internal_secret("e2e-internal-secret");
    world.start_platform().await;
}

#[given(expr = "{word} has registered and logged in")]
async fn registered_and_logged_in(world: &mut MsgWorld, user: String) {
    register(world, &user).await;
    log_in(world, &user).await;
    assert!(world.token(&user).is_some(), "{user} could not log in");
}

#[then("the platform is healthy")]
async fn platform_is_healthy(world: &mut MsgWorld) {
    let (code, body) = world.request("anonymous", Method::GET, "/health", |req| req).await;
    assert_eq!(code.as_u16(), 200);
    assert_eq!(body, "👍️\n");
}

//----------------------------------------------   Passport  ----------------------------------------------------
#[when(expr = "{word} registers")]
async fn registers(world: &mut MsgWorld, user: String) {
    register(world, &user).await;
}

#[when(expr = "{word} logs in")]
async fn logs_in(world: &mut MsgWorld, user: String) {
    log_in(world, &user).await;
}

async fn register(world: &mut MsgWorld, user: &str) {
    let login = login_for(user);
    let body = json!({
        "login": login,
        "email": format!("{login}@example.com"),
        "password": format!("{login}-password"),
        "name": user,
    });
    let res = world.request(user, Method::POST, "/passport/register", |req| req.json(&body)).await;
    world.response = Some(res);
}

async fn log_in(world: &mut MsgWorld, user: &str) {
    let login = login_for(user);
    let body = json!({"login": login, "password": format!("{login}-password")});
    let (code, text) = world.request(user, Method::POST, "/passport/login", |req| req.json(&body)).await;
    if code.is_success() {
        let res: Value = serde_json::from_str(&text).expect("Invalid login response");
        let token = res["token"].as_str().expect("No token in login response").to_string();
        world.tokens.insert(user.to_string(), token);
    }
    world.response = Some((code, text));
}

//----------------------------------------------   Requests  ----------------------------------------------------
#[when(expr = "{word} {word}s to {string} with body")]
async fn request_with_body(world: &mut MsgWorld, user: String, method: String, path: String, step: &Step) {
    let method = Method::from_str(method.as_str()).expect("Invalid method");
    let res = world
        .request(&user, method, &path, |req| match step.docstring().cloned() {
            Some(body) => req.body(body).header("Content-Type", "application/json"),
            None => req,
        })
        .await;
    world.response = Some(res);
}

#[when(expr = "{word} {word}s {string}")]
async fn request_without_body(world: &mut MsgWorld, user: String, method: String, path: String) {
    let method = Method::from_str(method.as_str()).expect("Invalid method");
    let res = world.request(&user, method, &path, |req| req).await;
    world.response = Some(res);
}

#[when(expr = "someone {word}s {string} with the credential {string}")]
async fn request_with_raw_credential(world: &mut MsgWorld, method: String, path: String, credential: String) {
    let method = Method::from_str(method.as_str()).expect("Invalid method");
    let res = world.request("anonymous", method, &path, |req| req.header("Authorization", credential)).await;
    world.response = Some(res);
}

#[when(expr = "{word} creates a {word} post titled {string}")]
async fn create_post(world: &mut MsgWorld, user: String, visibility: String, title: String) {
    let body = json!({"title": title, "description": format!("{title} by {user}"), "is_private": visibility == "private"});
    let (code, text) = world.request(&user, Method::POST, "/posts", |req| req.json(&body)).await;
    assert_eq!(code.as_u16(), 201, "Could not create post: {text}");
    let post: Value = serde_json::from_str(&text).expect("Invalid post");
    let id = post["post_id"].as_str().expect("No post id").to_string();
    debug!("🌍️ {user} created \"{title}\" with id {id}");
    world.post_ids.insert(title, id);
    world.response = Some((code, text));
}

//----------------------------------------------   Assertions  ----------------------------------------------------
#[then(expr = "I receive a {int} {word} response with the message {string}")]
async fn receive_response(world: &mut MsgWorld, status: u16, text: String, message: String) {
    let (res_status, res_msg) = world.response.take().expect("No response received");
    assert_eq!(res_status, status, "Expected {status} {text} response, got {res_status}");
    assert!(res_msg.contains(&message), "Expected response to contain '{message}', got '{res_msg}'");
}

#[then(expr = "I receive a {int} {word} response")]
async fn receive_response_code(world: &mut MsgWorld, status: u16, text: String) {
    let (res_status, res_msg) = world.response.clone().expect("No response received");
    assert_eq!(res_status, status, "Expected {status} {text} response, got {res_status}: {res_msg}");
}

#[then(expr = "I receive a partial JSON response:")]
async fn receive_json_response(world: &mut MsgWorld, step: &Step) {
    let (_res_status, res_msg) = world.response.take().expect("No response received");
    let expected = step.docstring().expect("No expected response");
    assert!(json_is_subset_of(expected, res_msg.as_str()), "Expected response to contain '{expected}', got '{res_msg}'");
}

#[then(expr = "the error category is {string}")]
async fn error_category(world: &mut MsgWorld, category: String) {
    let (_, res_msg) = world.response.clone().expect("No response received");
    let body: Value = serde_json::from_str(&res_msg).expect("Error responses are JSON");
    assert_eq!(body["category"], category.as_str());
}

#[then(expr = "the posts listed are {string}")]
async fn posts_listed(world: &mut MsgWorld, titles: String) {
    let (_, res_msg) = world.response.take().expect("No response received");
    let body: Value = serde_json::from_str(&res_msg).expect("Invalid listing");
    let listed = body["posts"]
        .as_array()
        .expect("No posts in listing")
        .iter()
        .map(|p| p["title"].as_str().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    let expected = titles.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()).collect::<Vec<_>>();
    assert_eq!(listed, expected);
    assert_eq!(body["total_count"], expected.len());
}
