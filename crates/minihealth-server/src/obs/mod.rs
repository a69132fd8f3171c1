//! Observability: metric registry, request instrumentation, resource sampling.

pub mod instrument;
pub mod registry;
pub mod sampler;

use minihealth_core::error::Result;

use registry::{MetricKind, MetricRegistry};

// Metric names registered at startup.
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const PROCESS_UPTIME_SECONDS: &str = "process_uptime_seconds";
pub const SYSTEM_CPU_PERCENT: &str = "system_cpu_percent";
pub const SYSTEM_MEMORY_PERCENT: &str = "system_memory_percent";

/// Build the process-wide registry. A duplicate name here is a programming
/// error and aborts initialization.
pub fn init_registry() -> Result<MetricRegistry> {
    let mut registry = MetricRegistry::new();
    registry.register(
        HTTP_REQUESTS_TOTAL,
        "Total number of HTTP requests",
        &["method", "path", "status"],
        MetricKind::Counter,
    )?;
    registry.register(
        HTTP_REQUEST_DURATION_SECONDS,
        "HTTP request latency in seconds",
        &["method", "path"],
        MetricKind::Histogram,
    )?;
    registry.register(
        PROCESS_UPTIME_SECONDS,
        "Process uptime in seconds",
        &[],
        MetricKind::Gauge,
    )?;
    registry.register(
        SYSTEM_CPU_PERCENT,
        "System CPU utilization percentage",
        &[],
        MetricKind::Gauge,
    )?;
    registry.register(
        SYSTEM_MEMORY_PERCENT,
        "System memory utilization percentage",
        &[],
        MetricKind::Gauge,
    )?;
    Ok(registry)
}
