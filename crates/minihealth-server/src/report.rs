//! Health reporting: liveness and uptime, independent of the metrics pipeline.

use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};

use minihealth_core::payload::{HealthDetail, Liveness};

/// Computes liveness/uptime responses from the process-wide start mark.
///
/// The start mark is a monotonic `Instant` captured once at construction, so
/// `uptime()` is non-negative and non-decreasing for the process lifetime.
#[derive(Debug, Clone)]
pub struct HealthReporter {
    started: Instant,
}

impl HealthReporter {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since process start (monotonic clock).
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Constant liveness body for orchestrator probes.
    pub fn liveness(&self) -> Liveness {
        Liveness::ok()
    }

    /// Uptime + current UTC timestamp (ISO-8601, microsecond precision).
    pub fn detail(&self) -> HealthDetail {
        HealthDetail::ok(
            self.uptime().as_secs_f64(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        )
    }
}

impl Default for HealthReporter {
    fn default() -> Self {
        Self::new()
    }
}
