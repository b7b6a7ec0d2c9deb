// Server Configuration Module
// Handles configuration from files with CLI overrides.

use crate::source::DataSource;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Server network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Benchmark document source configuration. A file path takes precedence
/// over a URL when both are set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Local path to the merged export document
    pub path: Option<String>,
    /// HTTP(S) URL serving the merged export document
    pub url: Option<String>,
}

/// Default location the ingestion step writes to.
pub fn default_document_path() -> String {
    "data/zeroeval_merged_leaderboard.json".to_string()
}

impl SourceConfig {
    /// Resolve the configured source, falling back to the default document
    /// path when nothing is set.
    pub fn data_source(&self) -> DataSource {
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            DataSource::File(path.into())
        } else if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            DataSource::Url(url.to_string())
        } else {
            DataSource::File(default_document_path().into())
        }
    }
}

/// Upstream ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Full leaderboard endpoint
    #[serde(default = "default_full_url")]
    pub full_url: String,
    /// Nested org/model list endpoint
    #[serde(default = "default_list_url")]
    pub list_url: String,
    /// Where to write the merged document
    #[serde(default = "default_document_path")]
    pub output: String,
}

fn default_full_url() -> String {
    crate::ingest::DEFAULT_FULL_URL.to_string()
}

fn default_list_url() -> String {
    crate::ingest::DEFAULT_LIST_URL.to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            full_url: default_full_url(),
            list_url: default_list_url(),
            output: default_document_path(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(String),
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.ingest.full_url.contains("zeroeval.com"));
        assert_eq!(config.ingest.output, default_document_path());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
server:
  port: 9000
  host: "127.0.0.1"

source:
  url: "https://example.com/leaderboard.json"

ingest:
  output: "out/merged.json"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.source.url.as_deref(),
            Some("https://example.com/leaderboard.json")
        );
        assert_eq!(config.ingest.output, "out/merged.json");
        assert!(config.ingest.full_url.contains("zeroeval.com"));
    }

    #[test]
    fn test_source_resolution_prefers_path() {
        let config = Config::from_yaml(
            r#"
source:
  path: "data/local.json"
  url: "https://example.com/leaderboard.json"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.source.data_source(),
            DataSource::File(p) if p.to_str() == Some("data/local.json")
        ));
    }

    #[test]
    fn test_source_resolution_falls_back_to_url_then_default() {
        let config = Config::from_yaml(
            r#"
source:
  url: "https://example.com/leaderboard.json"
"#,
        )
        .unwrap();
        assert!(matches!(config.source.data_source(), DataSource::Url(_)));

        let config = Config::default();
        assert!(matches!(
            config.source.data_source(),
            DataSource::File(p) if p.to_str() == Some("data/zeroeval_merged_leaderboard.json")
        ));
    }
}
