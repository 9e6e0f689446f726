//! HTTP API server for habitlog.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod auth;
mod extract;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use habitlog_core::{AppConfig, DEFAULT_CORS_ORIGIN};
use habitlog_service::{AuthService, EntryService, MedicineService, ServiceError};
use habitlog_storage::Storage;
use habitlog_storage::traits::HabitStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use auth::AuthSession;
pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub medicine_service: Arc<MedicineService>,
    pub entry_service: Arc<EntryService>,
    pub auth_service: Arc<AuthService>,
    /// Browser origin allowed to send credentialed requests.
    pub cors_origin: String,
    /// Add `Secure` to the refresh cookie.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(storage: Arc<Storage>, config: &AppConfig) -> Result<Self, ServiceError> {
        let store: Arc<dyn HabitStore> = storage;
        let zone = config.bucket_zone;
        Ok(Self {
            medicine_service: Arc::new(MedicineService::new(store.clone(), zone)),
            entry_service: Arc::new(EntryService::new(store, zone)),
            auth_service: Arc::new(AuthService::new(&config.jwt_secret)?),
            cors_origin: config.cors_origin.clone(),
            secure_cookies: config.secure_cookies,
        })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    use handlers::{auth, entries, medicine};

    let cors = cors_layer(&state.cors_origin);
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/auth/init", post(auth::init))
        .route("/api/auth/login", post(auth::init))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/protected", get(auth::protected))
        .route("/api/medicine/substances", get(medicine::substances))
        .route("/api/medicine/update", put(medicine::update))
        .route("/api/medicine/delete", axum::routing::delete(medicine::delete))
        .route("/api/medicine/{key}", get(medicine::list_for_date))
        .route("/api/medicine/{key}/create", post(medicine::create))
        .route("/api/medicine/{key}/pivot", get(medicine::pivot))
        .route("/api/medicine/{key}/histogram", get(medicine::histogram))
        .route("/api/entries", post(entries::create).put(entries::update).delete(entries::delete))
        .route("/api/entries/recent", get(entries::recent))
        .route("/api/entries/recent/{limit}", get(entries::recent_with_limit))
        .route("/api/entries/status/{completed}", get(entries::by_status))
        .route("/api/entries/{date}", get(entries::list_for_date))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Credentialed CORS for exactly one origin. Falls back to the default
/// origin when the configured value is not a valid header.
fn cors_layer(origin: &str) -> CorsLayer {
    let origin = HeaderValue::from_str(origin).unwrap_or_else(|e| {
        tracing::warn!(%origin, error = %e, "Invalid CORS origin, using default");
        HeaderValue::from_static(DEFAULT_CORS_ORIGIN)
    });
    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
