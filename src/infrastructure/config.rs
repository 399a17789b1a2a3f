use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::LogSink;
use crate::infrastructure::log_sinks::{TracingLogSink, WriterLogSink};

pub const CONFIG_PATH_VAR: &str = "ACCESSLOG_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub access_log: AccessLogConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessLogConfig {
    pub sink: SinkKind,
    /// UTC timestamp before each line. The `tracing` sink leaves this to the
    /// subscriber.
    pub timestamps: bool,
    pub prefix: String,
    /// Append the time to first response byte to each line.
    pub timing: bool,
    /// Report structured `tracing` fields instead of a formatted line; `sink`,
    /// `prefix` and `timing` do not apply.
    pub structured: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Stdout,
    Stderr,
    Tracing,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "accesslog=info,access_log=info,tower_http=debug".to_string(),
            json: false,
        }
    }
}

impl FromStr for SinkKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            "tracing" => Ok(Self::Tracing),
            _ => Err(ConfigError::InvalidValue {
                key: "ACCESS_LOG_SINK",
                value: s.to_string(),
            }),
        }
    }
}

impl Config {
    /// Loads `.env`, then the YAML file named by `ACCESSLOG_CONFIG` (if any),
    /// then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: port,
            })?;
        }
        if let Some(sink) = lookup("ACCESS_LOG_SINK") {
            self.access_log.sink = sink.parse()?;
        }
        if let Some(value) = lookup("ACCESS_LOG_TIMESTAMPS") {
            self.access_log.timestamps = parse_bool("ACCESS_LOG_TIMESTAMPS", value)?;
        }
        if let Some(value) = lookup("ACCESS_LOG_TIMING") {
            self.access_log.timing = parse_bool("ACCESS_LOG_TIMING", value)?;
        }
        if let Some(value) = lookup("ACCESS_LOG_STRUCTURED") {
            self.access_log.structured = parse_bool("ACCESS_LOG_STRUCTURED", value)?;
        }
        if let Some(value) = lookup("LOG_JSON") {
            self.log.json = parse_bool("LOG_JSON", value)?;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            self.log.filter = filter;
        }
        Ok(())
    }
}

impl AccessLogConfig {
    pub fn build_log_sink(&self) -> Arc<dyn LogSink> {
        match self.sink {
            SinkKind::Stdout => Arc::new(
                WriterLogSink::stdout()
                    .with_prefix(self.prefix.clone())
                    .with_timestamps(self.timestamps),
            ),
            SinkKind::Stderr => Arc::new(
                WriterLogSink::stderr()
                    .with_prefix(self.prefix.clone())
                    .with_timestamps(self.timestamps),
            ),
            SinkKind::Tracing => Arc::new(TracingLogSink::new().with_prefix(self.prefix.clone())),
        }
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.access_log.sink, SinkKind::Stdout);
        assert!(!config.access_log.timestamps);
        assert!(!config.access_log.structured);
        assert!(!config.log.json);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            r#"
server:
  port: 9000
  allowed_origins: ["https://example.com"]
access_log:
  sink: tracing
  timing: true
"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.allowed_origins, ["https://example.com"]);
        assert_eq!(config.access_log.sink, SinkKind::Tracing);
        assert!(config.access_log.timing);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("access_log:\n  sink: syslog\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/nonexistent/accesslog.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup(&[
                ("SERVER_HOST", "127.0.0.1"),
                ("SERVER_PORT", "3000"),
                ("ACCESS_LOG_SINK", "Stderr"),
                ("ACCESS_LOG_TIMESTAMPS", "true"),
                ("ACCESS_LOG_STRUCTURED", "on"),
                ("LOG_JSON", "1"),
                ("RUST_LOG", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.access_log.sink, SinkKind::Stderr);
        assert!(config.access_log.timestamps);
        assert!(config.access_log.structured);
        assert!(config.log.json);
        assert_eq!(config.log.filter, "debug");
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup(&[("SERVER_PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "SERVER_PORT", .. }
        ));
    }

    #[test]
    fn test_invalid_bool_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup(&[("ACCESS_LOG_TIMING", "sometimes")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "ACCESS_LOG_TIMING",
                ..
            }
        ));
    }
}
