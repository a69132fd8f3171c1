//! minihealth server library entry.
//!
//! This crate wires the config, metric registry, instrumentation middleware,
//! resource sampler, health reporter, and ops handlers into a servable router.
//! It is intended to be consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod report;
pub mod router;
