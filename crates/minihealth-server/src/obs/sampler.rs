//! System resource sampling behind a trait seam.
//!
//! The production sampler reads system-wide CPU and memory utilization via
//! `sysinfo`. The trait exists so tests can inject fakes (including failing
//! ones); sampling failure is recovered by the caller, never surfaced to
//! `/metrics` clients.

use std::sync::Mutex;

use sysinfo::System;

use minihealth_core::error::{HealthError, Result};

/// Point-in-time CPU/memory utilization, in percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceUsage {
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

/// Source of CPU/memory utilization.
pub trait ResourceSampler: Send + Sync {
    fn sample(&self) -> Result<ResourceUsage>;
}

/// sysinfo-backed sampler.
///
/// CPU usage is computed between consecutive refreshes, so the first sample
/// after startup reports 0.
pub struct SysinfoSampler {
    sys: Mutex<System>,
}

impl SysinfoSampler {
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceSampler for SysinfoSampler {
    fn sample(&self) -> Result<ResourceUsage> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|_| HealthError::Sampler("sampler lock poisoned".into()))?;
        sys.refresh_memory();
        sys.refresh_cpu_usage();

        let cpu_percent = f64::from(sys.global_cpu_usage());
        let total = sys.total_memory();
        let memory_percent = if total == 0 {
            0.0
        } else {
            sys.used_memory() as f64 / total as f64 * 100.0
        };

        Ok(ResourceUsage {
            cpu_percent,
            memory_percent,
        })
    }
}
