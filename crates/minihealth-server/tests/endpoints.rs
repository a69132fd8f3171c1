//! End-to-end endpoint tests against the real router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use minihealth_core::error::{HealthError, Result};
use minihealth_server::app_state::AppState;
use minihealth_server::config::ServerConfig;
use minihealth_server::obs::sampler::{ResourceSampler, ResourceUsage};
use minihealth_server::router::build_router;

struct FixedSampler(ResourceUsage);

impl ResourceSampler for FixedSampler {
    fn sample(&self) -> Result<ResourceUsage> {
        Ok(self.0)
    }
}

struct FailingSampler;

impl ResourceSampler for FailingSampler {
    fn sample(&self) -> Result<ResourceUsage> {
        Err(HealthError::Sampler("stats source unavailable".into()))
    }
}

fn test_app(sampler: Box<dyn ResourceSampler>) -> Router {
    let state = AppState::with_sampler(ServerConfig::default(), sampler).unwrap();
    build_router(state)
}

async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    let res = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn index_banner() {
    let app = test_app(Box::new(FixedSampler(ResourceUsage::default())));
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"message":"Mini Health API is running"}"#);
}

#[tokio::test]
async fn healthz_liveness() {
    let app = test_app(Box::new(FixedSampler(ResourceUsage::default())));
    let (status, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn health_detail_fields() {
    let app = test_app(Box::new(FixedSampler(ResourceUsage::default())));
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["status"], "ok");
    assert!(v["uptime_seconds"].as_f64().unwrap() >= 0.0);
    assert!(v["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn health_uptime_grows_across_delay() {
    let app = test_app(Box::new(FixedSampler(ResourceUsage::default())));

    let (_, first) = get(&app, "/health").await;
    let first: serde_json::Value = serde_json::from_str(&first).unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;

    let (_, second) = get(&app, "/health").await;
    let second: serde_json::Value = serde_json::from_str(&second).unwrap();

    let a = first["uptime_seconds"].as_f64().unwrap();
    let b = second["uptime_seconds"].as_f64().unwrap();
    assert!(b >= a);
    assert!(b >= 2.0);
}

#[tokio::test]
async fn healthz_requests_show_up_in_metrics() {
    let app = test_app(Box::new(FixedSampler(ResourceUsage::default())));

    for _ in 0..3 {
        let (status, _) = get(&app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(
        "http_requests_total{method=\"GET\",path=\"/healthz\",status=\"200\"} 3"
    ));
    assert!(body.contains(
        "http_request_duration_seconds_count{method=\"GET\",path=\"/healthz\"} 3"
    ));
}

#[tokio::test]
async fn metrics_reports_resource_and_uptime_gauges() {
    let app = test_app(Box::new(FixedSampler(ResourceUsage {
        cpu_percent: 12.5,
        memory_percent: 50.0,
    })));

    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("system_cpu_percent 12.5"));
    assert!(body.contains("system_memory_percent 50"));
    assert!(body.contains("# TYPE process_uptime_seconds gauge"));
}

#[tokio::test]
async fn metrics_stays_200_when_sampler_fails() {
    let app = test_app(Box::new(FailingSampler));

    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    // Last-known values start at zero; the gauges are still present.
    assert!(body.contains("system_cpu_percent 0"));
    assert!(body.contains("system_memory_percent 0"));
}

#[tokio::test]
async fn metrics_content_type() {
    let app = test_app(Box::new(FixedSampler(ResourceUsage::default())));
    let res = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; version=0.0.4; charset=utf-8"
    );
}

#[tokio::test]
async fn unmatched_routes_are_still_counted() {
    let app = test_app(Box::new(FixedSampler(ResourceUsage::default())));

    let (status, _) = get(&app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&app, "/metrics").await;
    assert!(body.contains(
        "http_requests_total{method=\"GET\",path=\"/nope\",status=\"404\"} 1"
    ));
}
