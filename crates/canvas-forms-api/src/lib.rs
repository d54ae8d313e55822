//! Canvas Forms API
//!
//! Persistence endpoint the form engine posts submissions to.
//!
//! ```text
//! POST /api/form-submit                          store a submission
//! GET  /api/form-submissions/:form_identifier    list a form's submissions
//! GET  /health                                   liveness
//! ```

pub mod models;
pub mod repository;
pub mod routes;

use axum::{routing::get, Router};
use repository::{InMemorySubmissionRepository, SubmissionRepository};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use models::*;

/// API state
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn SubmissionRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn SubmissionRepository>) -> Self {
        Self { repository }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemorySubmissionRepository::new()))
    }
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", routes::submissions::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}
