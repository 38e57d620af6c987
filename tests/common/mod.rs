#![allow(dead_code)]

use std::sync::Arc;

use snaplink::application::services::{AuthService, LinkService, RedirectService};
use snaplink::domain::stores::LinkStore;
use snaplink::infrastructure::persistence::JsonFileStore;
use snaplink::state::AppState;
use tempfile::TempDir;

pub const TEST_TOKEN: &str = "test-api-token";

pub fn json_store(dir: &TempDir) -> Arc<JsonFileStore> {
    Arc::new(JsonFileStore::new(dir.path().join("urls.json")))
}

pub fn create_test_state(store: Arc<dyn LinkStore>) -> AppState {
    create_test_state_with_policy(store, false)
}

pub fn create_test_state_with_policy(
    store: Arc<dyn LinkStore>,
    strict_visit_accounting: bool,
) -> AppState {
    AppState {
        store: store.clone(),
        link_service: Arc::new(LinkService::new(store.clone())),
        redirect_service: Arc::new(RedirectService::new(store, strict_visit_accounting)),
        auth_service: Arc::new(AuthService::new(
            TEST_TOKEN,
            "test-signing-secret".to_string(),
        )),
    }
}
