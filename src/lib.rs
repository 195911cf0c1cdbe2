//! Deck Advisor
//!
//! Imports archetype deck snapshots into a tagged SQLite deck catalog and
//! exposes the import over a small REST API.

pub mod api;
pub mod cards;
pub mod config;
pub mod db;
pub mod errors;
pub mod importer;
pub mod models;
pub mod notify;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use db::Repository;
use importer::CatalogImporter;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub importer: Arc<CatalogImporter>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, importer: CatalogImporter) -> Self {
        Self {
            repo,
            importer: Arc::new(importer),
        }
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalog
        .route("/decks", get(api::list_decks))
        .route("/decks/{id}", get(api::get_deck))
        .route("/catalog/revision", get(api::get_revision))
        // Import
        .route("/import", post(api::run_import))
        .route("/import", delete(api::purge_imported))
        .route("/import/status", get(api::import_status));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
