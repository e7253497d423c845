//! HTTP API server for cardbox.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_copy_implementations, reason = "Types may grow")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use axum::routing::{MethodRouter, get};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use cardbox_service::{CardService, CategoryService};
use cardbox_storage::StorageBackend;

pub use api_error::ApiError;
pub use response_types::{Envelope, EnvelopeStatus, SUCCESS_MESSAGE, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub card_service: Arc<CardService>,
    pub category_service: Arc<CategoryService>,
}

impl AppState {
    /// Builds both services over one storage backend.
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self {
            card_service: Arc::new(CardService::new(Arc::clone(&storage))),
            category_service: Arc::new(CategoryService::new(storage)),
        }
    }
}

/// Every resource path is served with and without a trailing slash.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cards: MethodRouter<Arc<AppState>> = get(handlers::cards::get_cards)
        .post(handlers::cards::create_card)
        .put(handlers::cards::update_card);
    let categories: MethodRouter<Arc<AppState>> = get(handlers::categories::get_categories)
        .post(handlers::categories::create_category)
        .put(handlers::categories::update_category);
    let suggest: MethodRouter<Arc<AppState>> = get(handlers::categories::suggest_categories);

    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/cards", cards.clone())
        .route("/cards/", cards)
        .route("/categories", categories.clone())
        .route("/categories/", categories)
        .route("/categories/suggest", suggest.clone())
        .route("/categories/suggest/", suggest)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
