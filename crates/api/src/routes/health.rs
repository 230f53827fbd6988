//! Unauthenticated diagnostics

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub account: String,
    pub repository: String,
    pub branch: String,
    pub uptime_seconds: u64,
}

pub async fn root() -> String {
    format!("depot {}\n", env!("CARGO_PKG_VERSION"))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        account: state.repository.account.clone(),
        repository: state.repository.repository.clone(),
        branch: state.repository.branch.clone(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
