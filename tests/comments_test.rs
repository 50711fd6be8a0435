mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::test_app;

#[tokio::test]
async fn test_create_and_list_comments() {
    let app = test_app();
    let (alice_id, alice_token) = app.signup("alice").await;
    let (bob_id, bob_token) = app.signup("bob").await;

    let (_, created) = app.create_post(&alice_token, "Post", "Body").await;
    let post_id = created["post"]["id"].as_i64().unwrap();
    let uri = format!("/api/posts/{post_id}/comments");

    let (status, body) = app
        .request(Method::POST, &uri, Some(&bob_token), Some(json!({ "content": "Nice post" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "comment created");
    assert_eq!(body["comment"]["post_id"], post_id);
    assert_eq!(body["comment"]["user_id"], bob_id);
    assert_eq!(body["comment"]["author"]["username"], "bob");

    let (status, _) = app
        .request(Method::POST, &uri, Some(&alice_token), Some(json!({ "content": "Thanks" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.request(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "Thanks");
    assert_eq!(comments[0]["user_id"], alice_id);
    assert_eq!(comments[1]["content"], "Nice post");
    assert_eq!(body["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_comment_on_missing_post_is_not_found() {
    let app = test_app();
    let (_, token) = app.signup("alice").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/posts/42/comments",
            Some(&token),
            Some(json!({ "content": "Hello?" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "post not found");

    let (status, _) = app.request(Method::GET, "/api/posts/42/comments", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_requires_authentication() {
    let app = test_app();
    let (_, token) = app.signup("alice").await;
    let (_, created) = app.create_post(&token, "Post", "Body").await;
    let uri = format!("/api/posts/{}/comments", created["post"]["id"]);

    let (status, _) = app
        .request(Method::POST, &uri, None, Some(json!({ "content": "anonymous" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.request(Method::GET, &uri, None, None).await;
    assert_eq!(body["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_comment_length_validated() {
    let app = test_app();
    let (_, token) = app.signup("alice").await;
    let (_, created) = app.create_post(&token, "Post", "Body").await;
    let uri = format!("/api/posts/{}/comments", created["post"]["id"]);

    let (status, _) = app
        .request(Method::POST, &uri, Some(&token), Some(json!({ "content": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(Method::POST, &uri, Some(&token), Some(json!({ "content": "c".repeat(501) })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_post_removes_its_comments() {
    let app = test_app();
    let (_, token) = app.signup("alice").await;
    let (_, created) = app.create_post(&token, "Post", "Body").await;
    let post_id = created["post"]["id"].as_i64().unwrap();
    let uri = format!("/api/posts/{post_id}/comments");

    app.request(Method::POST, &uri, Some(&token), Some(json!({ "content": "first" })))
        .await;
    let (status, _) = app
        .request(Method::DELETE, &format!("/api/posts/{post_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_positive_post_id_is_bad_request() {
    let app = test_app();
    let (_, token) = app.signup("alice").await;

    let (status, body) = app.request(Method::GET, "/api/posts/-1/comments", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "post id must be a positive integer");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/posts/0/comments",
            Some(&token),
            Some(json!({ "content": "Hello?" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
