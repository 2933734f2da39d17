//! Common test utilities

use std::sync::Arc;

use axum::Router;
use uuid::Uuid;

use budget_buddy_api::auth::{AuthenticatedUser, StaticCredentialResolver};
use budget_buddy_api::store::MemoryStore;
use budget_buddy_api::{api, AppState, Config};

pub const TEST_TOKEN: &str = "test-token-123";
pub const TEST_EMAIL: &str = "user@example.com";

pub fn test_user_id() -> Uuid {
    "11111111-2222-3333-4444-555555555555".parse().unwrap()
}

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        cors_enabled: true,
        cors_allow_origin: "*".to_string(),
        api_tokens: Vec::new(),
    }
}

/// Build an app with an empty in-memory store and one registered token.
pub fn test_app() -> Router {
    let mut credentials = StaticCredentialResolver::new();
    credentials.register(
        TEST_TOKEN,
        AuthenticatedUser {
            id: test_user_id(),
            email: TEST_EMAIL.to_string(),
        },
    );

    let state = AppState::new(
        test_config(),
        Arc::new(MemoryStore::new()),
        Arc::new(credentials),
    );

    api::create_router(state)
}

/// Same as `test_app`, but with CORS disabled.
pub fn test_app_without_cors() -> Router {
    let mut credentials = StaticCredentialResolver::new();
    credentials.register(
        TEST_TOKEN,
        AuthenticatedUser {
            id: test_user_id(),
            email: TEST_EMAIL.to_string(),
        },
    );

    let mut config = test_config();
    config.cors_enabled = false;

    let state = AppState::new(config, Arc::new(MemoryStore::new()), Arc::new(credentials));

    api::create_router(state)
}
