//! Server config loader (strict parsing).
//!
//! Configuration is environment-driven: `PORT` and `LOG_LEVEL`. Unset keys
//! fall back to defaults; set-but-invalid keys fail startup.

pub mod schema;

use minihealth_core::error::{HealthError, Result};

pub use schema::ServerConfig;

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<ServerConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary key lookup. Tests inject maps here
/// instead of mutating the process environment.
pub fn load_with(get: impl Fn(&str) -> Option<String>) -> Result<ServerConfig> {
    let mut cfg = ServerConfig::default();

    if let Some(raw) = get("PORT") {
        cfg.port = raw
            .trim()
            .parse::<u16>()
            .map_err(|e| HealthError::Config(format!("PORT invalid: {e}")))?;
    }

    if let Some(raw) = get("LOG_LEVEL") {
        let raw = raw.trim();
        if !raw.is_empty() {
            cfg.log_level = raw.to_string();
        }
    }

    cfg.validate()?;
    Ok(cfg)
}
