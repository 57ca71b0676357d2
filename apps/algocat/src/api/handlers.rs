//! # API Endpoint Handlers
//!
//! Read-only handlers over the shared catalog store.

use super::{
    AppState,
    types::{
        AlgorithmSummary, CategoriesResponse, ErrorResponse, HashResponse, HealthResponse,
        ListParams, ListResponse, StatusResponse,
    },
};
use algocat_core::{CatalogError, blake3_hash, canonical_checksum};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Map a core error to an HTTP status and JSON body.
fn error_response(err: &CatalogError) -> Response {
    let status = match err {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

// =============================================================================
// HEALTH & STATUS
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// Catalog counts plus the load report totals.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = StatusResponse::new(
        state.store.stats(),
        state.rejected_count,
        state.warning_count,
    );
    (StatusCode::OK, Json(response))
}

// =============================================================================
// ALGORITHMS
// =============================================================================

/// Filtered, paginated listing.
///
/// The query string is read as raw pairs so no filter value can turn into a
/// 400; see `ListParams::from_pairs`.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let params = ListParams::from_pairs(pairs);
    if params.malformed {
        return (StatusCode::OK, Json(ListResponse::empty(params.pagination())));
    }

    let page = state.store.query(&params.filter(), params.pagination());
    let response = ListResponse {
        total: page.total,
        offset: page.offset,
        limit: page.limit,
        items: page.records.into_iter().map(AlgorithmSummary::from).collect(),
    };
    (StatusCode::OK, Json(response))
}

/// Full record by id.
pub async fn get_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id) {
        Ok(record) => Json(record).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Fixture bundle for the test harness.
pub async fn fixtures_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.fixtures(&id) {
        Ok(bundle) => Json(bundle).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// CATEGORIES & HASH
// =============================================================================

pub async fn categories_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = CategoriesResponse {
        categories: state
            .store
            .categories()
            .into_iter()
            .map(Into::into)
            .collect(),
    };
    (StatusCode::OK, Json(response))
}

/// Checksum and BLAKE3 digest of the canonical export.
pub async fn hash_handler(State(state): State<AppState>) -> Response {
    let fingerprint = canonical_checksum(&state.store).and_then(|checksum| {
        blake3_hash(&state.store).map(|blake3| HashResponse {
            record_count: state.store.len(),
            checksum,
            blake3,
        })
    });

    match fingerprint {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(&e),
    }
}
