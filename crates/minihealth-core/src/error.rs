//! Shared error type across minihealth crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, HealthError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum HealthError {
    /// Two metrics registered under the same name. Fatal at startup.
    #[error("duplicate metric: {0}")]
    DuplicateMetric(String),
    /// A label-value tuple of the wrong arity was supplied for a metric.
    /// Label sets are fixed at call sites, so this is a programming error.
    #[error("label set mismatch for {metric}: expected {expected} values, got {got}")]
    UnknownLabelSet {
        metric: String,
        expected: usize,
        got: usize,
    },
    /// A metric was looked up under the wrong kind (e.g. `counter()` on a gauge).
    #[error("metric kind mismatch for {0}")]
    KindMismatch(String),
    /// A metric name that was never registered.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    /// Invalid environment configuration. Fatal at startup.
    #[error("config: {0}")]
    Config(String),
    /// Resource sampling failed. Recovered locally with last-known values.
    #[error("sampler: {0}")]
    Sampler(String),
    #[error("internal: {0}")]
    Internal(String),
}
