//! Wire-shape tests for the JSON payload types.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use minihealth_core::payload::{HealthDetail, IndexMessage, Liveness};

#[test]
fn index_message_shape() {
    let s = serde_json::to_string(&IndexMessage::new()).unwrap();
    assert_eq!(s, r#"{"message":"Mini Health API is running"}"#);
}

#[test]
fn liveness_shape() {
    let s = serde_json::to_string(&Liveness::ok()).unwrap();
    assert_eq!(s, r#"{"status":"ok"}"#);
}

#[test]
fn health_detail_shape() {
    let body = HealthDetail::ok(12.5, "2026-01-01T00:00:00.000000+00:00".into());
    let v: serde_json::Value = serde_json::from_str(&serde_json::to_string(&body).unwrap()).unwrap();
    assert_eq!(v["status"], "ok");
    assert_eq!(v["uptime_seconds"], 12.5);
    assert_eq!(v["timestamp"], "2026-01-01T00:00:00.000000+00:00");
}

#[test]
fn health_detail_uptime_never_negative_by_construction() {
    let body = HealthDetail::ok(0.0, "2026-01-01T00:00:00.000000+00:00".into());
    assert!(body.uptime_seconds >= 0.0);
}
