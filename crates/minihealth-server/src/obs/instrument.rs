//! Request instrumentation middleware.
//!
//! Every inbound request is bracketed: a monotonic timer starts on entry, and
//! on exit (every exit path, error responses included) the request counter and
//! latency histogram are updated and one structured log line is emitted. The
//! finalize step runs exactly once per request.

use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use minihealth_core::error::Result;

use super::registry::MetricRegistry;
use super::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};
use crate::app_state::AppState;

/// Per-in-flight-request scratch state. Created when a request begins,
/// consumed when the response is finalized, never shared across requests.
#[derive(Debug)]
pub struct RequestContext {
    start: Instant,
    method: String,
    path: String,
}

impl RequestContext {
    pub fn begin(method: &str, path: &str) -> Self {
        Self {
            start: Instant::now(),
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Axum middleware: start/finalize bracketing around every route.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let ctx = RequestContext::begin(req.method().as_str(), req.uri().path());
    let res = next.run(req).await;
    finish_request(state.registry(), Some(ctx), res.status().as_u16());
    res
}

/// Finalize one request: update the counter and histogram, emit the log line.
///
/// A missing context degrades to a zero duration and `unknown` labels; the
/// counter is still recorded and nothing panics.
pub fn finish_request(registry: &MetricRegistry, ctx: Option<RequestContext>, status: u16) {
    let (method, path, duration) = match ctx {
        Some(ctx) => {
            let duration = ctx.elapsed();
            (ctx.method, ctx.path, duration)
        }
        None => ("unknown".to_string(), "unknown".to_string(), Duration::ZERO),
    };
    let status = status.to_string();

    if let Err(e) = record(registry, &method, &path, &status, duration) {
        // Label sets are fixed at the call sites above, so this is a
        // programming error. Log it; never fail the response over it.
        tracing::error!(error = %e, "metric update failed");
    }

    tracing::info!(
        method = %method,
        path = %path,
        status = %status,
        duration_s = %format!("{:.4}", duration.as_secs_f64()),
        "request"
    );
}

fn record(
    registry: &MetricRegistry,
    method: &str,
    path: &str,
    status: &str,
    duration: Duration,
) -> Result<()> {
    registry
        .counter(HTTP_REQUESTS_TOTAL)?
        .labels(&[method, path, status])?
        .inc();
    registry
        .histogram(HTTP_REQUEST_DURATION_SECONDS)?
        .labels(&[method, path])?
        .observe(duration.as_secs_f64());
    Ok(())
}
