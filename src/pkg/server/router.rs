use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::handlers::ui::home;
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new()?;
    let app = Router::new()
        .route("/", get(home))
        .route("/candidates", post(handlers::candidates::upload))
        .route("/candidates/submit", post(handlers::candidates::submit))
        .route(
            "/candidates/submit-batch",
            post(handlers::candidates::submit_batch),
        )
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        // a multi-file upload of 10MB resumes outgrows axum's 2MB default
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .with_state(state);

    Ok(app)
}
