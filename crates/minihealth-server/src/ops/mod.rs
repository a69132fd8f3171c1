//! Operational HTTP endpoints.
//!
//! - `/`        : index banner
//! - `/health`  : uptime + timestamp
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use minihealth_core::payload::IndexMessage;

use crate::app_state::AppState;

pub async fn index() -> impl IntoResponse {
    Json(IndexMessage::new())
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.reporter().detail())
}

pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.reporter().liveness())
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    state.resource_snapshot();
    let body = state.registry().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
