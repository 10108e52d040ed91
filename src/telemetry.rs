use crate::config::TelemetryConfig;
use crate::error::ConfigError;
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Fails if one is already installed.
pub fn init(cfg: &TelemetryConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.filter))
        .map_err(|e| ConfigError::Telemetry(e.to_string()))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if cfg.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| ConfigError::Telemetry(e.to_string()))
}
