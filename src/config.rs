use serde::{Deserialize, Serialize};
use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use crate::report::OutputFormat;

/// Target and pacing of one measurement run. Fixed once the run starts.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MeasurementConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-attempt connect timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_runs")]
    pub runs: usize,
    /// Pause before each attempt, in seconds.
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,
}

fn default_port() -> u16 {
    443
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_runs() -> usize {
    5
}

fn default_wait_secs() -> u64 {
    1
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            runs: default_runs(),
            wait_secs: default_wait_secs(),
        }
    }
}

impl MeasurementConfig {
    pub fn new(host: impl Into<String>, port: u16, timeout_secs: u64, runs: usize, wait_secs: u64) -> Self {
        Self {
            host: host.into(),
            port,
            timeout_secs,
            runs,
            wait_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn wait(&self) -> Duration {
        Duration::from_secs(self.wait_secs)
    }

    /// Only the host is checked. Port, timeout and run count go to the
    /// transport as given and fail there if they are unusable.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "Please provide a host either as argument or via --host flag, see tcplatency -h"
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProbeConfig {
    #[serde(flatten)]
    pub measurement: MeasurementConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            measurement: MeasurementConfig::default(),
            log_level: default_log_level(),
            format: OutputFormat::default(),
        }
    }
}

impl ProbeConfig {
    /// Get the log level as a tracing::Level
    pub fn get_tracing_level(&self) -> Result<tracing::Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(tracing::Level::TRACE),
            "debug" => Ok(tracing::Level::DEBUG),
            "info" => Ok(tracing::Level::INFO),
            "warn" | "warning" => Ok(tracing::Level::WARN),
            "error" => Ok(tracing::Level::ERROR),
            _ => Err(anyhow::anyhow!("Invalid log level: {}. Valid levels are: trace, debug, info, warn, error", self.log_level))
        }
    }

    /// Reads a JSON config file. Absent keys fall back to the defaults.
    pub async fn load_file_config(file_path: &str) -> Result<ProbeConfig> {
        if !Path::new(file_path).exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", file_path));
        }

        let content = fs::read_to_string(file_path).await?;
        let config: ProbeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let cfg = ProbeConfig::default();
        assert_eq!(cfg.measurement.port, 443);
        assert_eq!(cfg.measurement.timeout_secs, 5);
        assert_eq!(cfg.measurement.runs, 5);
        assert_eq!(cfg.measurement.wait_secs, 1);
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.format, OutputFormat::Text);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: ProbeConfig =
            serde_json::from_str(r#"{"host": "example.com", "runs": 3, "format": "json"}"#).unwrap();
        assert_eq!(cfg.measurement.host, "example.com");
        assert_eq!(cfg.measurement.runs, 3);
        assert_eq!(cfg.measurement.port, 443);
        assert_eq!(cfg.measurement.wait(), Duration::from_secs(1));
        assert_eq!(cfg.format, OutputFormat::Json);
    }

    #[test]
    fn empty_host_is_rejected() {
        assert!(MeasurementConfig::default().validate().is_err());
        assert!(MeasurementConfig::new("  ", 443, 5, 5, 1).validate().is_err());
        assert!(MeasurementConfig::new("example.com", 0, 0, 0, 0).validate().is_ok());
    }

    #[test]
    fn log_levels() {
        let mut cfg = ProbeConfig::default();
        cfg.log_level = "WARNING".to_string();
        assert_eq!(cfg.get_tracing_level().unwrap(), tracing::Level::WARN);
        cfg.log_level = "loud".to_string();
        assert!(cfg.get_tracing_level().is_err());
    }

    #[tokio::test]
    async fn missing_config_file() {
        let err = ProbeConfig::load_file_config("/nonexistent/tcplatency.json")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
