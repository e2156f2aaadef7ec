use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::pipeline::{Outcome, Pipeline};

#[derive(Deserialize)]
pub struct CheckReq {
    claim: String,
}

/// Runs one claim. Validation failures answer 422, everything else 200 with
/// the (possibly degraded) report.
pub async fn check(
    State(pipeline): State<Arc<Pipeline>>,
    Json(req): Json<CheckReq>,
) -> (StatusCode, Json<Outcome>) {
    let outcome = pipeline.run(&req.claim).await;
    let status = match outcome {
        Outcome::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    (status, Json(outcome))
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/check", post(check))
        .route("/health", get(health))
        .with_state(pipeline)
}

pub async fn run_server(pipeline: Pipeline, addr: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(pipeline));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
