//! End-to-end tests for the HTTP API.
//!
//! The full router is exercised through `tower::ServiceExt::oneshot`
//! with in-memory storage and mocked crawl/oracle dependencies - no
//! network, no filesystem.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use extraction::MockIngestor;
use server_core::domains::catalog::{CatalogStore, MemoryCatalogStore};
use server_core::kernel::MockAI;
use server_core::server::{build_app, AppState};

const SEED_URL: &str = "https://www.shl.com/solutions/products/";
const TTL: u64 = 86_400;

// ============================================================================
// Test Helpers
// ============================================================================

struct TestApp {
    router: axum::Router,
    store: Arc<MemoryCatalogStore>,
    ingestor: MockIngestor,
}

/// Build an app whose crawl always fails (catalog falls back to the
/// built-in defaults) and whose oracle replies with `reply`.
fn app_with_reply(reply: &str) -> TestApp {
    let store = Arc::new(MemoryCatalogStore::new(TTL));
    let ai = Arc::new(MockAI::new().with_reply(reply));
    let ingestor = MockIngestor::new().with_failure(SEED_URL);

    let state = AppState::new(
        store.clone(),
        ai,
        Arc::new(ingestor.clone()),
        SEED_URL.to_string(),
    );
    TestApp {
        router: build_app(state),
        store,
        ingestor,
    }
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

fn post_json(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_returns_healthy() {
    let app = app_with_reply("unused");

    let response = app.router.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "healthy"}));
}

// ============================================================================
// Assessments
// ============================================================================

#[tokio::test]
async fn assessments_fall_back_to_defaults_when_crawl_fails() {
    let app = app_with_reply("unused");

    let response = app.router.oneshot(get("/assessments")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let assessments = body["assessments"].as_array().unwrap();
    assert_eq!(assessments.len(), 2);
    assert_eq!(assessments[0]["name"], "Verify Interactive");
    assert_eq!(
        assessments[1]["name"],
        "Occupational Personality Questionnaire (OPQ)"
    );
    assert_eq!(assessments[0]["remote_testing"], true);
}

#[tokio::test]
async fn assessments_populate_the_cache() {
    let app = app_with_reply("unused");

    let response = app.router.clone().oneshot(get("/assessments")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Cache was written with a current timestamp
    let envelope = app.store.load().await.unwrap();
    assert_eq!(envelope.assessments.len(), 2);
}

#[tokio::test]
async fn refresh_reports_count_and_unnamed() {
    let app = app_with_reply("unused");

    let response = app
        .router
        .oneshot(get("/refresh-assessments"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 2);
    assert_eq!(body["unnamed_count"], 0);
}

// ============================================================================
// Recommend
// ============================================================================

#[tokio::test]
async fn recommend_returns_matched_assessments() {
    let app = app_with_reply("I recommend 0 and also 1");

    let response = app
        .router
        .oneshot(post_json(
            "/recommend",
            json!({"text": "Hiring a graduate analyst, need cognitive and personality screens"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["name"], "Verify Interactive");
    assert_eq!(
        recs[1]["name"],
        "Occupational Personality Questionnaire (OPQ)"
    );
}

#[tokio::test]
async fn recommend_out_of_range_ids_yield_empty_list() {
    // Ids exist in the reply but none fall inside the catalog, which is
    // a valid empty result rather than an error.
    let app = app_with_reply("Try 7, 8 and 9");

    let response = app
        .router
        .oneshot(post_json("/recommend", json!({"text": "some role"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn recommend_without_input_is_bad_request() {
    let app = app_with_reply("unused");

    let response = app
        .router
        .oneshot(post_json("/recommend", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("text or url"));

    // Rejected before any catalog work: no scrape, no cache write
    assert_eq!(app.ingestor.extract_call_count(), 0);
    assert!(app.store.load().await.is_none());
}

#[tokio::test]
async fn recommend_digitless_reply_is_server_error() {
    let app = app_with_reply("I cannot pick anything from this catalog.");

    let response = app
        .router
        .oneshot(post_json("/recommend", json!({"text": "some role"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn recommend_unreachable_url_is_bad_request() {
    let app = app_with_reply("unused");

    // MockIngestor has no page for this URL, so the fetch fails.
    let response = app
        .router
        .oneshot(post_json(
            "/recommend",
            json!({"url": "https://jobs.example.com/posting/123"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recommend_uses_fresh_cache_without_refetching() {
    let app = app_with_reply("0");

    // Pre-populate the store so the handler skips the fetcher entirely.
    app.store
        .set(server_core::domains::catalog::default_catalog())
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(post_json("/recommend", json!({"text": "graduate screen"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
}
