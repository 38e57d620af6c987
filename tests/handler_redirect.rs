mod common;

use axum_test::TestServer;
use snaplink::domain::entities::NewLink;
use snaplink::domain::stores::LinkStore;
use snaplink::routes::router;
use snaplink::utils::password::hash_password;
use tempfile::TempDir;

async fn insert_link(
    store: &dyn LinkStore,
    slug: &str,
    url: &str,
    allowed_visits: u32,
    password: Option<&str>,
) {
    store
        .insert(NewLink {
            slug: slug.to_string(),
            target_url: url.to_string(),
            password_hash: password.map(|p| hash_password(p).unwrap()),
            allowed_visits,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_redirect_success() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = TestServer::new(router(common::create_test_state(store.clone()))).unwrap();

    insert_link(&*store, "abc12", "http://example.com", 0, None).await;

    let response = server
        .get("/abc12")
        .add_header("Referer", "https://ref.example")
        .await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "http://example.com");
    assert_eq!(
        response.header("cache-control"),
        "no-cache, no-store, must-revalidate"
    );

    let link = store.get("abc12").await.unwrap().unwrap();
    assert_eq!(link.visits.len(), 1);
    assert_eq!(link.visits[0].referer, "https://ref.example");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = TestServer::new(router(common::create_test_state(store))).unwrap();

    let response = server.get("/ghost").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_visit_cap_expires_link() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = TestServer::new(router(common::create_test_state(store.clone()))).unwrap();

    insert_link(&*store, "abc12", "http://example.com", 2, None).await;

    assert_eq!(server.get("/abc12").await.status_code(), 301);
    assert_eq!(server.get("/abc12").await.status_code(), 301);

    // Third attempt: the cap of 2 is exhausted.
    let response = server.get("/abc12").await;
    assert_eq!(response.status_code(), 403);

    let link = store.get("abc12").await.unwrap().unwrap();
    assert_eq!(link.visits.len(), 2);
}

#[tokio::test]
async fn test_unlimited_link_never_expires() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = TestServer::new(router(common::create_test_state(store.clone()))).unwrap();

    insert_link(&*store, "abc12", "http://example.com", 0, None).await;

    for _ in 0..5 {
        assert_eq!(server.get("/abc12").await.status_code(), 301);
    }

    let link = store.get("abc12").await.unwrap().unwrap();
    assert_eq!(link.visits.len(), 5);
}

#[tokio::test]
async fn test_protected_link_prompts_instead_of_redirecting() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = TestServer::new(router(common::create_test_state(store.clone()))).unwrap();

    insert_link(&*store, "abc12", "http://example.com", 0, Some("letmein")).await;

    let response = server
        .get("/abc12")
        .add_header("Referer", "https://ref.example")
        .await;

    assert_eq!(response.status_code(), 200);
    let body = response.text();
    assert!(body.contains("password"));
    assert!(body.contains("https://ref.example"));
    assert!(!body.contains("Incorrect password"));

    // A prompt is not a visit.
    let link = store.get("abc12").await.unwrap().unwrap();
    assert!(link.visits.is_empty());
}

#[tokio::test]
async fn test_wrong_password_reprompts_without_visit() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = TestServer::new(router(common::create_test_state(store.clone()))).unwrap();

    insert_link(&*store, "abc12", "http://example.com", 0, Some("letmein")).await;

    let response = server
        .post("/abc12")
        .form(&[("password", "guess"), ("referer", "https://ref.example")])
        .await;

    assert_eq!(response.status_code(), 200);
    let body = response.text();
    assert!(body.contains("Incorrect password"));
    assert!(body.contains("https://ref.example"));

    let link = store.get("abc12").await.unwrap().unwrap();
    assert!(link.visits.is_empty());
}

#[tokio::test]
async fn test_correct_password_redirects_and_records_carried_referer() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = TestServer::new(router(common::create_test_state(store.clone()))).unwrap();

    insert_link(&*store, "abc12", "http://example.com", 0, Some("letmein")).await;

    let response = server
        .post("/abc12")
        .form(&[("password", "letmein"), ("referer", "https://ref.example")])
        .await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "http://example.com");

    let link = store.get("abc12").await.unwrap().unwrap();
    assert_eq!(link.visits.len(), 1);
    assert_eq!(link.visits[0].referer, "https://ref.example");
}

#[tokio::test]
async fn test_post_on_unprotected_link_redirects() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = TestServer::new(router(common::create_test_state(store.clone()))).unwrap();

    insert_link(&*store, "abc12", "http://example.com", 0, None).await;

    let response = server
        .post("/abc12")
        .form(&[("password", ""), ("referer", "")])
        .await;

    assert_eq!(response.status_code(), 301);
}

#[tokio::test]
async fn test_expired_protected_link_never_prompts() {
    let dir = TempDir::new().unwrap();
    let store = common::json_store(&dir);
    let server = TestServer::new(router(common::create_test_state(store.clone()))).unwrap();

    insert_link(&*store, "abc12", "http://example.com", 1, Some("letmein")).await;

    let unlock = server
        .post("/abc12")
        .form(&[("password", "letmein"), ("referer", "")])
        .await;
    assert_eq!(unlock.status_code(), 301);

    // The cap is exhausted, so even the password prompt is gone.
    let response = server.get("/abc12").await;
    assert_eq!(response.status_code(), 403);
}
