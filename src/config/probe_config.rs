use std::str::FromStr;

use serde::Deserialize;

/// How the result set is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(other.to_string()),
        }
    }
}

/// Probe configuration for stunbox.
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProbeConfig {
    /// Deadline for a single probe, counted from the moment it starts.
    /// Defaults to 5000 milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Output format of the report.
    #[serde(default)]
    pub output: OutputFormat,

    /// Width of the server column in table output.
    #[serde(default = "default_max_server_width")]
    pub max_server_width: usize,
}

fn default_probe_timeout_ms() -> u64 {
    5000
}

fn default_max_server_width() -> usize {
    40
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            output: OutputFormat::default(),
            max_server_width: default_max_server_width(),
        }
    }
}
