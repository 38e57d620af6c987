mod common;

use axum_test::TestServer;
use serde_json::{Value, json};
use snaplink::domain::stores::LinkStore;
use snaplink::routes::router;
use tempfile::TempDir;

fn make_server(store: std::sync::Arc<snaplink::infrastructure::persistence::JsonFileStore>) -> TestServer {
    TestServer::new(router(common::create_test_state(store))).unwrap()
}

#[tokio::test]
async fn test_api_rejects_missing_token() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let response = server.get("/api/urls").await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_api_rejects_wrong_token() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let response = server
        .get("/api/urls")
        .authorization_bearer("not-the-token")
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_create_with_generated_slug() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let response = server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://example.com" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["slug"].as_str().unwrap().len(), 5);
    assert_eq!(body["url"], "http://example.com");
    assert_eq!(body["allowed_visits"], 0);
    assert_eq!(body["visit_count"], 0);
}

#[tokio::test]
async fn test_create_respects_slug_length() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let response = server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://example.com", "slug_length": 8 }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["slug"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_create_with_explicit_slug_conflicts_on_duplicate() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let first = server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://example.com", "slug": "taken" }))
        .await;
    assert_eq!(first.status_code(), 201);

    let second = server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://other.example", "slug": "taken" }))
        .await;
    assert_eq!(second.status_code(), 409);
}

#[tokio::test]
async fn test_create_rejects_invalid_url() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let response = server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "not-a-url" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_responses_never_contain_password() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let created = server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({
            "url": "http://example.com",
            "slug": "locked",
            "password": "hunter2"
        }))
        .await;
    assert_eq!(created.status_code(), 201);
    assert!(!created.text().contains("password"));

    let fetched = server
        .get("/api/urls/locked")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    assert_eq!(fetched.status_code(), 200);
    assert!(!fetched.text().contains("password"));

    let listed = server
        .get("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    assert_eq!(listed.status_code(), 200);
    assert!(!listed.text().contains("password"));
    assert!(!listed.text().contains("hunter2"));
}

#[tokio::test]
async fn test_list_returns_all_links_with_visits() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = make_server(store.clone());

    for slug in ["one", "two"] {
        let response = server
            .post("/api/urls")
            .authorization_bearer(common::TEST_TOKEN)
            .json(&json!({ "url": "http://example.com", "slug": slug }))
            .await;
        assert_eq!(response.status_code(), 201);
    }
    store.record_visit("one", "https://ref.example").await.unwrap();

    let response = server
        .get("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .await;

    let body: Value = response.json();
    let links = body.as_array().unwrap();
    assert_eq!(links.len(), 2);

    let one = links.iter().find(|l| l["slug"] == "one").unwrap();
    assert_eq!(one["visit_count"], 1);
    assert_eq!(one["visits"][0]["referer"], "https://ref.example");
}

#[tokio::test]
async fn test_get_unknown_slug_is_not_found() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let response = server
        .get("/api/urls/ghost")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_replaces_url_and_cap() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://example.com", "slug": "mylink" }))
        .await
        .assert_status_success();

    let response = server
        .put("/api/urls/mylink")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://new.example", "allowed_visits": 3 }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["url"], "http://new.example");
    assert_eq!(body["allowed_visits"], 3);
}

#[tokio::test]
async fn test_update_unknown_slug_is_not_found() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let response = server
        .put("/api/urls/ghost")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://example.com" }))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_password_null_removes_the_gate() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({
            "url": "http://example.com",
            "slug": "locked",
            "password": "hunter2"
        }))
        .await
        .assert_status_success();

    // Protected: the public path serves the prompt.
    assert_eq!(server.get("/locked").await.status_code(), 200);

    server
        .put("/api/urls/locked")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://example.com", "password": null }))
        .await
        .assert_status_success();

    // Gate removed: the public path redirects immediately.
    assert_eq!(server.get("/locked").await.status_code(), 301);
}

#[tokio::test]
async fn test_update_without_password_field_keeps_the_gate() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({
            "url": "http://example.com",
            "slug": "locked",
            "password": "hunter2"
        }))
        .await
        .assert_status_success();

    server
        .put("/api/urls/locked")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://moved.example" }))
        .await
        .assert_status_success();

    // Still prompts, and still accepts the original password.
    assert_eq!(server.get("/locked").await.status_code(), 200);
    let response = server
        .post("/locked")
        .form(&[("password", "hunter2"), ("referer", "")])
        .await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "http://moved.example");
}

#[tokio::test]
async fn test_delete_removes_link_and_redirect() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    server
        .post("/api/urls")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "url": "http://example.com", "slug": "mylink" }))
        .await
        .assert_status_success();

    let response = server
        .delete("/api/urls/mylink")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    assert_eq!(response.status_code(), 204);

    server
        .get("/api/urls/mylink")
        .authorization_bearer(common::TEST_TOKEN)
        .await
        .assert_status_not_found();
    server.get("/mylink").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_unknown_slug_is_not_found() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let response = server
        .delete("/api/urls/ghost")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let dir = TempDir::new().unwrap();
    let server = make_server(common::json_store(&dir));

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
