// ABOUTME: HTTP API layer for the Hivemind services providing routing
// ABOUTME: Integration layer that depends on all domain packages

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};

pub mod analyze_handlers;
pub mod dataset_handlers;
pub mod evaluate_handlers;
pub mod milestone_handlers;
pub mod sse;
pub mod state;

pub use state::{CompanionState, ProvementState};

/// Maximum accepted dataset upload size (50MB).
const MAX_UPLOAD_SIZE: usize = 52_428_800;

/// Creates the companion (feedback) service router.
pub fn create_companion_router(state: CompanionState) -> Router {
    Router::new()
        .route("/api/analyze-agent", post(analyze_handlers::analyze_agent))
        .route(
            "/api/milestones/stream",
            post(milestone_handlers::milestones_stream),
        )
        .route("/api/upload-dataset", post(dataset_handlers::upload_dataset))
        .route("/health", get(dataset_handlers::health_check))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .with_state(state)
}

/// Creates the provement (proof evaluation) service router.
pub fn create_provement_router(state: ProvementState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_handlers::evaluate))
        .with_state(state)
}
