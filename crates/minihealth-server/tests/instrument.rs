//! Request finalize-path tests: exactly-once recording, error statuses, and
//! the missing-context fallback.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use minihealth_server::obs;
use minihealth_server::obs::instrument::{finish_request, RequestContext};

#[test]
fn finalize_records_counter_and_histogram() {
    let registry = obs::init_registry().unwrap();
    let ctx = RequestContext::begin("GET", "/health");
    finish_request(&registry, Some(ctx), 200);

    let rendered = registry.render();
    assert!(rendered
        .contains("http_requests_total{method=\"GET\",path=\"/health\",status=\"200\"} 1"));
    assert!(rendered
        .contains("http_request_duration_seconds_count{method=\"GET\",path=\"/health\"} 1"));
}

#[test]
fn finalize_runs_for_error_statuses() {
    let registry = obs::init_registry().unwrap();
    let ctx = RequestContext::begin("GET", "/health");
    finish_request(&registry, Some(ctx), 500);

    assert!(registry
        .render()
        .contains("http_requests_total{method=\"GET\",path=\"/health\",status=\"500\"} 1"));
}

#[test]
fn missing_context_falls_back_to_zero_duration() {
    let registry = obs::init_registry().unwrap();
    finish_request(&registry, None, 200);

    let rendered = registry.render();
    // Counter still recorded, under fallback labels.
    assert!(rendered
        .contains("http_requests_total{method=\"unknown\",path=\"unknown\",status=\"200\"} 1"));
    // Zero duration lands in the smallest bucket.
    assert!(rendered.contains(
        "http_request_duration_seconds_bucket{method=\"unknown\",path=\"unknown\",le=\"0.005\"} 1"
    ));
    assert!(rendered
        .contains("http_request_duration_seconds_sum{method=\"unknown\",path=\"unknown\"} 0"));
}

#[test]
fn elapsed_duration_is_nonnegative() {
    let ctx = RequestContext::begin("GET", "/");
    assert!(ctx.elapsed().as_secs_f64() >= 0.0);
}
