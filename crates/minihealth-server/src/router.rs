//! Axum router wiring.
//!
//! Every route is wrapped by the instrumentation middleware so each request is
//! counted and timed, including error responses.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, obs::instrument, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::index))
        .route("/health", get(ops::health))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            instrument::track_requests,
        ))
        .with_state(state)
}
