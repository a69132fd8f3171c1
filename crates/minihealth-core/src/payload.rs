//! JSON response bodies for the HTTP surface.
//!
//! These are the stable wire shapes; field names and values are part of the
//! API and covered by vector tests.

use serde::Serialize;

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct IndexMessage {
    pub message: &'static str,
}

impl IndexMessage {
    pub fn new() -> Self {
        Self {
            message: "Mini Health API is running",
        }
    }
}

impl Default for IndexMessage {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of `GET /healthz` (liveness probe).
#[derive(Debug, Clone, Serialize)]
pub struct Liveness {
    pub status: &'static str,
}

impl Liveness {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthDetail {
    pub status: &'static str,
    /// Seconds since process start. Non-negative, monotonically non-decreasing
    /// within a process lifetime.
    pub uptime_seconds: f64,
    /// Current UTC time, ISO-8601.
    pub timestamp: String,
}

impl HealthDetail {
    pub fn ok(uptime_seconds: f64, timestamp: String) -> Self {
        Self {
            status: "ok",
            uptime_seconds,
            timestamp,
        }
    }
}
