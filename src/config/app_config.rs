use std::env;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::probe_config::{OutputFormat, ProbeConfig};

const DEFAULT_CONFIG_FILE: &str = "config.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid YAML in {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("PROBE_TIMEOUT_MS must be a number of milliseconds, got {0:?}")]
    InvalidTimeout(String),
    #[error("STUNBOX_OUTPUT must be 'table' or 'json', got {0:?}")]
    InvalidOutput(String),
    #[error("The probe timeout must be greater than zero")]
    ZeroTimeout,
}

pub struct AppConfig {
    pub probe: ProbeConfig,
    /// File holding the server list; stdin when unset.
    pub input_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe.probe_timeout_ms)
    }
}

/// Load the application configuration from a YAML file and environment variables
/// This function reads the configuration file specified by the `CONFIG_FILE` environment variable,
/// falls back to defaults when that file does not exist, and overrides the result with
/// `PROBE_TIMEOUT_MS` and `STUNBOX_OUTPUT`. The server list location comes from `STUN_LIST_FILE`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_file_location =
        env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    let mut probe = match std::fs::read_to_string(&config_file_location) {
        Ok(config_str) => parse_probe_config(&config_str, &config_file_location)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("No config file at {config_file_location}, using defaults");
            ProbeConfig::default()
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: config_file_location,
                source,
            });
        }
    };

    apply_env_overrides(&mut probe, |key| env::var(key).ok())?;

    log::info!(
        "Using probe timeout of {}ms, {:?} output",
        probe.probe_timeout_ms,
        probe.output
    );

    Ok(AppConfig {
        probe,
        input_file: env::var_os("STUN_LIST_FILE").map(PathBuf::from),
    })
}

fn parse_probe_config(config_str: &str, path: &str) -> Result<ProbeConfig, ConfigError> {
    // An empty file is a valid "use the defaults".
    if config_str.trim().is_empty() {
        return Ok(ProbeConfig::default());
    }
    serde_yaml::from_str(config_str).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn apply_env_overrides(
    probe: &mut ProbeConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(timeout) = lookup("PROBE_TIMEOUT_MS") {
        probe.probe_timeout_ms = timeout
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout(timeout.clone()))?;
    }
    if let Some(output) = lookup("STUNBOX_OUTPUT") {
        probe.output = output.parse::<OutputFormat>().map_err(ConfigError::InvalidOutput)?;
    }
    if probe.probe_timeout_ms == 0 {
        return Err(ConfigError::ZeroTimeout);
    }
    Ok(())
}
