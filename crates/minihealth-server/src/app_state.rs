//! Shared application state.
//!
//! One registry, one reporter, one sampler, built at startup and passed to
//! handlers explicitly (no ambient globals) so tests can run with isolated
//! registries and fake samplers.

use std::sync::{Arc, Mutex};

use minihealth_core::error::Result;

use crate::config::ServerConfig;
use crate::obs;
use crate::obs::registry::MetricRegistry;
use crate::obs::sampler::{ResourceSampler, ResourceUsage, SysinfoSampler};
use crate::report::HealthReporter;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    registry: MetricRegistry,
    reporter: HealthReporter,
    sampler: Box<dyn ResourceSampler>,
    // Last successful sample; substituted when sampling fails.
    last_usage: Mutex<ResourceUsage>,
}

impl AppState {
    /// Build application state with the sysinfo-backed sampler.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_sampler(cfg, Box::new(SysinfoSampler::new()))
    }

    /// Build application state with an injected sampler.
    pub fn with_sampler(cfg: ServerConfig, sampler: Box<dyn ResourceSampler>) -> Result<Self> {
        let registry = obs::init_registry()?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                reporter: HealthReporter::new(),
                sampler,
                last_usage: Mutex::new(ResourceUsage::default()),
            }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.inner.registry
    }

    pub fn reporter(&self) -> &HealthReporter {
        &self.inner.reporter
    }

    /// Refresh the resource and uptime gauges ahead of a render.
    ///
    /// Sampling failure falls back to the last-known usage (zero until the
    /// first success); `/metrics` always serves best-effort data.
    pub fn resource_snapshot(&self) {
        let usage = match self.inner.sampler.sample() {
            Ok(usage) => {
                if let Ok(mut last) = self.inner.last_usage.lock() {
                    *last = usage;
                }
                usage
            }
            Err(e) => {
                tracing::warn!(error = %e, "resource sampling failed, using last-known values");
                self.inner
                    .last_usage
                    .lock()
                    .map(|last| *last)
                    .unwrap_or_default()
            }
        };

        if let Err(e) = self.write_snapshot_gauges(usage) {
            tracing::error!(error = %e, "gauge update failed");
        }
    }

    fn write_snapshot_gauges(&self, usage: ResourceUsage) -> Result<()> {
        let registry = self.registry();
        registry
            .gauge(obs::SYSTEM_CPU_PERCENT)?
            .labels(&[])?
            .set(usage.cpu_percent);
        registry
            .gauge(obs::SYSTEM_MEMORY_PERCENT)?
            .labels(&[])?
            .set(usage.memory_percent);
        registry
            .gauge(obs::PROCESS_UPTIME_SECONDS)?
            .labels(&[])?
            .set(self.reporter().uptime().as_secs_f64());
        Ok(())
    }
}
