use std::net::SocketAddr;

use minihealth_core::error::{HealthError, Result};

/// Server configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to bind (all interfaces).
    pub port: u16,
    /// Minimum log severity, as a tracing `EnvFilter` directive.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(HealthError::Config("PORT must be nonzero".into()));
        }
        // Reject filters EnvFilter cannot parse up front so startup fails
        // loudly instead of serving with no logging.
        tracing_subscriber::EnvFilter::try_new(&self.log_level)
            .map_err(|e| HealthError::Config(format!("LOG_LEVEL invalid: {e}")))?;
        Ok(())
    }

    /// Bind address: `0.0.0.0:<port>`.
    pub fn listen(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".into()
}
