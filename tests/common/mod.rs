//! Test utilities and helper functions for the mycosoft-search test suite

use mockito::{Mock, Server, ServerGuard};
use serde_json::{Value, json};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a tracing subscriber honoring `RUST_LOG`, once per test binary
///
/// Lets `RUST_LOG=mycosoft_search=debug cargo test` surface the crate's
/// fetch and supersession traces when debugging a failure.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Sets up a mock HTTP server standing in for the backend and the
/// external document sources
#[allow(dead_code)]
pub async fn setup_mock_server() -> ServerGuard {
    init_tracing();
    Server::new_async().await
}

/// A well-formed suggestion payload entry
#[allow(dead_code)]
pub fn suggestion_json(id: &str, title: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "type": kind,
        "url": format!("/species/{id}"),
    })
}

/// A well-formed result payload entry
#[allow(dead_code)]
pub fn result_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "type": "fungi",
        "url": format!("/species/{id}"),
        "description": "A catalog entry",
    })
}

/// Mocks a JSON endpoint with the given body
#[allow(dead_code)]
pub async fn create_json_mock(
    server: &mut ServerGuard,
    path: &str,
    body: &Value,
) -> Mock {
    server
        .mock("GET", path)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Mocks an endpoint that fails with the given status
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut ServerGuard, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .match_query(mockito::Matcher::Any)
        .with_status(status)
        .create_async()
        .await
}
