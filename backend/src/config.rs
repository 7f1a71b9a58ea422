//! Service configuration file support.
//!
//! Reads `constellation.toml` sections for the repository, cache, inference
//! engine and HTTP server. Every field has a default so a missing file or an
//! empty section still yields a runnable configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::RepositoryError;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub inference: InferenceSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// JSON seed document loaded into the local repository.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

/// Result cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

/// Embedding/reduction engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceSettings {
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

/// HTTP bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ttl_seconds() -> u64 {
    3600
}

fn default_max_entries() -> usize {
    1024
}

fn default_model_id() -> String {
    "stub-embedding-v1".to_string()
}

fn default_dimensions() -> usize {
    64
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            seed_file: None,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: default_ttl_seconds(),
            max_entries: default_max_entries(),
        }
    }
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            dimensions: default_dimensions(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `constellation.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("constellation.toml"),
            PathBuf::from("backend/constellation.toml"),
            PathBuf::from("../constellation.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No constellation.toml found in standard locations",
        ))
    }

    /// Resolve configuration for the server process.
    ///
    /// `CONSTELLATION_CONFIG` names an explicit file; otherwise the default
    /// locations are searched and built-in defaults are used when nothing is
    /// found. `REPOSITORY_TYPE` overrides `[repository] type`; `HOST` and
    /// `PORT` override the server section.
    pub fn load() -> Result<Self, RepositoryError> {
        let mut config = match std::env::var("CONSTELLATION_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location().unwrap_or_else(|e| {
                log::info!("Using default configuration ({})", e);
                Self::default()
            }),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(repo_type) = std::env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            self.server.port = port;
        }
    }

    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache.ttl_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[repository]
type = "local"
seed_file = "data/seed.json"

[cache]
enabled = false
ttl_seconds = 120
max_entries = 16

[inference]
model_id = "chem-bert"
dimensions = 256

[server]
host = "127.0.0.1"
port = 9000
"#;

        let config = ServiceConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.repository.repo_type, "local");
        assert_eq!(
            config.repository.seed_file,
            Some(PathBuf::from("data/seed.json"))
        );
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_seconds, 120);
        assert_eq!(config.cache.max_entries, 16);
        assert_eq!(config.inference.model_id, "chem-bert");
        assert_eq!(config.inference.dimensions, 256);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(config.repository.repo_type, "local");
        assert!(config.cache.enabled);
        assert_eq!(config.cache_ttl(), std::time::Duration::from_secs(3600));
        assert_eq!(config.inference.dimensions, 64);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config = ServiceConfig::from_toml_str("[cache]\nttl_seconds = 5\n").unwrap();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_seconds, 5);
        assert_eq!(config.cache.max_entries, 1024);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let result = ServiceConfig::from_toml_str("[cache\nttl_seconds = ");
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 7070").unwrap();
        let config = ServiceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 7070);
    }
}
