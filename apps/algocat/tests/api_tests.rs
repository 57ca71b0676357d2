//! Integration tests for the algocat HTTP API.
//!
//! Uses axum-test to exercise the router over the bundled catalog without
//! binding a real socket.

#![allow(clippy::unwrap_used, clippy::panic)]

use algocat::api::{
    AppState, CategoriesResponse, ErrorResponse, HashResponse, HealthResponse, ListResponse,
    StatusResponse, create_router,
};
use algocat::config::SecurityConfig;
use algocat_core::{AlgorithmRecord, CatalogLoader, Difficulty, ListType};
use axum::http::{HeaderValue, Method, Request, StatusCode, header};
use axum_test::TestServer;
use serde_json::Value;
use tower::ServiceExt;

const CATALOG: &str = include_str!("../../../data/catalog.json");

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Security settings with rate limiting off so tests never trip the quota.
fn open_security() -> SecurityConfig {
    SecurityConfig {
        rate_limit: 0,
        cors_origins: None,
        api_key: None,
    }
}

fn state_with(security: SecurityConfig) -> AppState {
    let outcome = CatalogLoader::load_json(CATALOG).unwrap();
    AppState::new(outcome, security)
}

fn create_test_server() -> TestServer {
    TestServer::new(create_router(state_with(open_security()))).unwrap()
}

fn create_auth_test_server(api_key: &str) -> TestServer {
    let security = SecurityConfig {
        api_key: Some(api_key.to_string()),
        ..open_security()
    };
    TestServer::new(create_router(state_with(security))).unwrap()
}

fn item_ids(list: &ListResponse) -> Vec<&str> {
    list.items.iter().map(|i| i.id.as_str()).collect()
}

// =============================================================================
// HEALTH & STATUS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[tokio::test]
async fn test_status_reports_counts() {
    let server = create_test_server();

    let response = server.get("/status").await;

    response.assert_status_ok();
    let status: StatusResponse = response.json();
    assert_eq!(status.record_count, 10);
    assert_eq!(status.category_count, 3);
    assert_eq!(status.rejected_count, 0);
    assert!(status.warning_count > 0);
    assert_eq!(status.by_difficulty.get(Difficulty::Easy.as_str()), Some(&4));
    assert_eq!(status.by_list_type.get(ListType::Blind75.as_str()), Some(&3));
}

#[tokio::test]
async fn test_status_counts_rejected_records() {
    let mut raws: Vec<Value> = serde_json::from_str(CATALOG).unwrap();
    raws.push(serde_json::json!({
        "id": "bad-difficulty",
        "name": "Bad",
        "title": "Bad",
        "category": "Graphs",
        "difficulty": "impossible",
        "listType": "coreAlgo"
    }));
    let outcome = CatalogLoader::load(&raws).unwrap();
    let server = TestServer::new(create_router(AppState::new(outcome, open_security()))).unwrap();

    let status: StatusResponse = server.get("/status").await.json();
    assert_eq!(status.record_count, 10);
    assert_eq!(status.rejected_count, 1);

    server
        .get("/algorithms/bad-difficulty")
        .await
        .assert_status_not_found();
}

// =============================================================================
// LISTING
// =============================================================================

#[tokio::test]
async fn test_list_defaults_to_first_page() {
    let server = create_test_server();

    let response = server.get("/algorithms").await;

    response.assert_status_ok();
    let list: ListResponse = response.json();
    assert_eq!(list.total, 10);
    assert_eq!(list.offset, 0);
    assert_eq!(list.limit, 20);
    assert_eq!(list.items.len(), 10);

    let ids = item_ids(&list);
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted, "unranked listing is in id order");
}

#[tokio::test]
async fn test_list_filters_compose() {
    let server = create_test_server();

    let response = server
        .get("/algorithms")
        .add_query_param("category", "Graphs")
        .add_query_param("difficulty", "intermediate")
        .await;

    response.assert_status_ok();
    let list: ListResponse = response.json();
    assert_eq!(item_ids(&list), vec!["bfs-grid", "topological-sort"]);
}

#[tokio::test]
async fn test_list_by_list_type_and_tag() {
    let server = create_test_server();

    let blind75: ListResponse = server
        .get("/algorithms")
        .add_query_param("listType", "blind75")
        .await
        .json();
    assert_eq!(
        item_ids(&blind75),
        vec!["rotate-array", "sliding-window", "topological-sort"]
    );

    let google: ListResponse = server
        .get("/algorithms")
        .add_query_param("tag", "GOOGLE")
        .await
        .json();
    assert_eq!(
        item_ids(&google),
        vec!["bfs-grid", "binary-search", "dijkstra", "two-pointers"]
    );
}

#[tokio::test]
async fn test_list_text_search_ranks_exact_title_first() {
    let server = create_test_server();

    let list: ListResponse = server
        .get("/algorithms")
        .add_query_param("q", "Binary Search")
        .await
        .json();

    assert_eq!(list.items.first().map(|i| i.id.as_str()), Some("binary-search"));
}

#[tokio::test]
async fn test_list_unknown_difficulty_is_empty_not_error() {
    let server = create_test_server();

    let response = server
        .get("/algorithms")
        .add_query_param("difficulty", "legendary")
        .await;

    response.assert_status_ok();
    let list: ListResponse = response.json();
    assert_eq!(list.total, 0);
    assert!(list.items.is_empty());
}

#[tokio::test]
async fn test_list_pagination() {
    let server = create_test_server();

    let first: ListResponse = server
        .get("/algorithms")
        .add_query_param("limit", "4")
        .await
        .json();
    let second: ListResponse = server
        .get("/algorithms")
        .add_query_param("offset", "4")
        .add_query_param("limit", "4")
        .await
        .json();
    let past_end: ListResponse = server
        .get("/algorithms")
        .add_query_param("offset", "50")
        .await
        .json();

    assert_eq!(first.total, 10);
    assert_eq!(first.items.len(), 4);
    assert_eq!(second.items.len(), 4);
    assert!(
        first
            .items
            .iter()
            .all(|a| second.items.iter().all(|b| a.id != b.id))
    );
    assert_eq!(past_end.total, 10);
    assert!(past_end.items.is_empty());
}

#[tokio::test]
async fn test_list_limit_is_clamped() {
    let server = create_test_server();

    let list: ListResponse = server
        .get("/algorithms")
        .add_query_param("limit", "100000")
        .await
        .json();

    assert_eq!(list.limit, algocat_core::primitives::MAX_PAGE_SIZE);
}

#[tokio::test]
async fn test_list_repeated_filter_is_empty_not_error() {
    let server = create_test_server();

    for key in ["difficulty", "tag", "category", "listType", "q"] {
        let response = server
            .get("/algorithms")
            .add_query_param(key, "easy")
            .add_query_param(key, "google")
            .await;

        response.assert_status_ok();
        let list: ListResponse = response.json();
        assert_eq!(list.total, 0, "repeated `{key}`");
        assert!(list.items.is_empty(), "repeated `{key}`");
    }
}

#[tokio::test]
async fn test_list_unparseable_paging_falls_back_to_defaults() {
    let server = create_test_server();

    let response = server
        .get("/algorithms")
        .add_query_param("limit", "abc")
        .add_query_param("offset", "-1")
        .await;

    response.assert_status_ok();
    let list: ListResponse = response.json();
    assert_eq!(list.offset, 0);
    assert_eq!(list.limit, algocat_core::primitives::DEFAULT_PAGE_SIZE);
    assert_eq!(list.total, 10);
    assert_eq!(list.items.len(), 10);
}

#[tokio::test]
async fn test_list_summary_uses_camel_case() {
    let server = create_test_server();

    let body: Value = server
        .get("/algorithms")
        .add_query_param("tag", "google")
        .await
        .json();

    let item = &body["items"][0];
    assert!(item.get("listType").is_some());
    assert!(item.get("companyTags").is_some());
    assert!(item.get("fixtureCount").is_some());
    assert!(item.get("list_type").is_none());
}

// =============================================================================
// RECORDS & FIXTURES
// =============================================================================

#[tokio::test]
async fn test_get_algorithm_returns_normalized_record() {
    let server = create_test_server();

    let response = server.get("/algorithms/two-pointers").await;

    response.assert_status_ok();
    let record: AlgorithmRecord = response.json();
    assert_eq!(record.id, "two-pointers");
    assert_eq!(record.implementations.len(), 4);
    assert_eq!(record.company_tags, vec!["Amazon", "Google", "Meta"]);
}

#[tokio::test]
async fn test_get_unknown_algorithm_is_404() {
    let server = create_test_server();

    let response = server.get("/algorithms/bogo-sort").await;

    response.assert_status_not_found();
    let error: ErrorResponse = response.json();
    assert!(error.error.contains("bogo-sort"));
}

#[tokio::test]
async fn test_fixtures_bundle() {
    let server = create_test_server();

    let response = server.get("/algorithms/prefix-sum/fixtures").await;

    response.assert_status_ok();
    let bundle: Value = response.json();
    assert_eq!(bundle["algorithmId"], "prefix-sum");
    let fixtures = bundle["fixtures"].as_array().unwrap();
    assert_eq!(fixtures.len(), 2);
    assert_eq!(fixtures[0]["index"], 0);
    assert!(fixtures.iter().all(|f| !f["expected"].is_null()));
}

#[tokio::test]
async fn test_fixtures_unknown_algorithm_is_404() {
    let server = create_test_server();

    server
        .get("/algorithms/bogo-sort/fixtures")
        .await
        .assert_status_not_found();
}

// =============================================================================
// CATEGORIES & HASH
// =============================================================================

#[tokio::test]
async fn test_categories() {
    let server = create_test_server();

    let response = server.get("/categories").await;

    response.assert_status_ok();
    let categories: CategoriesResponse = response.json();
    let names: Vec<(&str, usize)> = categories
        .categories
        .iter()
        .map(|c| (c.category.as_str(), c.count))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Arrays & Strings", 5),
            ("Dynamic Programming", 1),
            ("Graphs", 4)
        ]
    );
}

#[tokio::test]
async fn test_hash_is_stable_across_servers() {
    let first: HashResponse = create_test_server().get("/hash").await.json();
    let second: HashResponse = create_test_server().get("/hash").await.json();

    assert_eq!(first.record_count, 10);
    assert_eq!(first.checksum, second.checksum);
    assert_eq!(first.blake3, second.blake3);
    assert_eq!(first.blake3.len(), 64);
}

// =============================================================================
// AUTHENTICATION
// =============================================================================

#[tokio::test]
async fn test_auth_valid_bearer_token() {
    let api_key = "test-secret-key-12345";
    let server = create_auth_test_server(api_key);

    let response = server
        .get("/status")
        .add_header(
            header::AUTHORIZATION,
            format!("Bearer {}", api_key)
                .parse::<HeaderValue>()
                .unwrap(),
        )
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_auth_valid_raw_token() {
    let api_key = "test-raw-key-67890";
    let server = create_auth_test_server(api_key);

    let response = server
        .get("/algorithms/kadane")
        .add_header(header::AUTHORIZATION, api_key.parse::<HeaderValue>().unwrap())
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_auth_invalid_token_rejected() {
    let server = create_auth_test_server("correct-key");

    let response = server
        .get("/algorithms")
        .add_header(
            header::AUTHORIZATION,
            "Bearer wrong-key".parse::<HeaderValue>().unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_missing_header_rejected() {
    let server = create_auth_test_server("required-key");

    let response = server.get("/status").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_health_endpoint_bypasses_auth() {
    let server = create_auth_test_server("secret-key-for-bypass-test");

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_empty_api_key_disables_auth() {
    let server = create_auth_test_server("");

    server.get("/status").await.assert_status_ok();
}

// =============================================================================
// RATE LIMITING & CORS
// =============================================================================

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let security = SecurityConfig {
        rate_limit: 1,
        ..open_security()
    };
    let server = TestServer::new(create_router(state_with(security))).unwrap();

    server.get("/health").await.assert_status_ok();
    server
        .get("/health")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_cors_allows_localhost_by_default() {
    let router = create_router(state_with(open_security()));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/algorithms")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}

#[tokio::test]
async fn test_cors_rejects_foreign_origin() {
    let router = create_router(state_with(open_security()));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/algorithms")
        .header(header::ORIGIN, "https://evil.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
