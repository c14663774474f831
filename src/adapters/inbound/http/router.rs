use axum::{Router, http::HeaderName, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{
    handlers::{get_export_file, get_export_status, health},
    middleware::OwnerIdentityLayer,
};
use crate::ports::{
    services::{ContentResolver, OutputFilter},
    upstream::ExportStatusSource,
};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub export_filter: Arc<dyn OutputFilter>,
    pub resolver: Arc<dyn ContentResolver>,
    pub status_source: Arc<dyn ExportStatusSource>,
    /// Trusted header carrying the verified owner id
    pub owner_header: HeaderName,
    /// Echo internal error detail to clients
    pub debug: bool,
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let owner_layer = OwnerIdentityLayer::new(state.owner_header.clone());

    Router::new()
        .route("/health", get(health))
        .route("/_operations/export/{job_id}", get(get_export_status))
        .route("/_export/{container}/{*blob}", get(get_export_file))
        .layer(owner_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
