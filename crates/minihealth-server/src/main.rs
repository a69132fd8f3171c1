//! Mini Health API server.
//!
//! - JSON endpoints: `/`, `/health`, `/healthz`
//! - Prometheus text exposition: `/metrics`
//! - Per-request counter + latency histogram via middleware
//! - Env config: PORT (default 8000), LOG_LEVEL (default info)

use tracing_subscriber::{fmt, EnvFilter};

use minihealth_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    let cfg = config::load_from_env().expect("config load failed");

    // validate() already proved the directive parses.
    let filter = EnvFilter::try_new(&cfg.log_level).expect("LOG_LEVEL must be a valid filter");
    fmt().with_env_filter(filter).init();

    let listen = cfg.listen();
    let state = app_state::AppState::new(cfg).expect("state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "minihealth-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
