//! # algocat HTTP API Module
//!
//! Read-only REST API over an immutable catalog store.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Catalog counts and load report totals
//! - `GET /algorithms` - Filtered, paginated listing
//! - `GET /algorithms/{id}` - Full record
//! - `GET /algorithms/{id}/fixtures` - Fixture bundle for a test harness
//! - `GET /categories` - Categories with record counts
//! - `GET /hash` - Checksum and BLAKE3 digest of the canonical export
//!
//! ## Security Configuration
//!
//! Taken from [`SecurityConfig`] (config file or `ALGOCAT_*` environment):
//! - `cors_origins`: comma-separated origins, or `*` for all (default: localhost only)
//! - `rate_limit`: requests per second (default: 100, 0 to disable)
//! - `api_key`: if set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::key_matches;
pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{
    AlgorithmSummary, CategoriesResponse, CategoryEntry, ErrorResponse, HashResponse,
    HealthResponse, ListParams, ListResponse, StatusResponse,
};

use crate::config::SecurityConfig;
use algocat_core::{CatalogError, CatalogStore, LoadOutcome};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request body limit. Every route is a GET, so this only caps stray payloads.
const MAX_BODY_SIZE: usize = 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state. The store never changes after startup, so no lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub rejected_count: usize,
    pub warning_count: usize,
    pub security: Arc<SecurityConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(outcome: LoadOutcome, security: SecurityConfig) -> Self {
        Self {
            store: Arc::new(outcome.store),
            rejected_count: outcome.report.rejected.len(),
            warning_count: outcome.report.warnings.len(),
            security: Arc::new(security),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer.
///
/// - `*`: any origin
/// - a comma-separated list: those origins
/// - unset, or nothing valid in the list: localhost only
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| match s.parse::<HeaderValue>() {
                    Ok(hv) => {
                        tracing::info!("CORS: Allowing origin: {}", s);
                        Some(hv)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", s, e);
                        None
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing
/// 2. CORS
/// 3. Body limit
/// 4. Rate limiting (if enabled)
/// 5. Authentication (if a key is configured)
pub fn create_router(state: AppState) -> Router {
    let security = Arc::clone(&state.security);
    let cors = build_cors_layer(security.cors_origins.as_deref());

    let rate_limiter = if security.rate_limit > 0 {
        tracing::info!(
            "Rate limiting enabled: {} requests/second",
            security.rate_limit
        );
        Some(create_rate_limiter(security.rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let api_key: Option<Arc<str>> = security.api_key().map(Arc::from);
    if api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible. \
             Set ALGOCAT_API_KEY or [security] api_key to enable it."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/algorithms", get(handlers::list_handler))
        .route("/algorithms/{id}", get(handlers::get_handler))
        .route("/algorithms/{id}/fixtures", get(handlers::fixtures_handler))
        .route("/categories", get(handlers::categories_handler))
        .route("/hash", get(handlers::hash_handler));

    if let Some(key) = api_key {
        router = router.layer(axum_middleware::from_fn_with_state(
            key,
            auth::api_key_auth_middleware,
        ));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Bind `addr` and serve until Ctrl-C.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), CatalogError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CatalogError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("algocat HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CatalogError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
