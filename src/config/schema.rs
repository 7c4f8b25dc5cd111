//! Configuration schema for Bookstore
//!
//! Configuration is stored at `~/.config/bookstore/config.toml`

use super::ConfigManager;
use crate::error::BookstoreResult;
use crate::repository::NodePath;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Content repository settings
    pub repository: RepositoryConfig,

    /// Catalog rules
    pub catalog: CatalogConfig,
}

impl Config {
    /// Check values that parse but cannot be used
    pub fn validate(&self) -> Result<(), String> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|e| format!("server.bind '{}': {}", self.server.bind, e))?;

        let root = NodePath::parse(&self.repository.root_path)
            .map_err(|e| format!("repository.root_path: {}", e))?;
        if root.is_root() {
            return Err("repository.root_path must not be the repository root".to_string());
        }

        if self.catalog.isbn_length == 0 {
            return Err("catalog.isbn_length must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Content repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Collection node holding one child node per book
    pub root_path: String,

    /// Where the repository is persisted (default: state dir)
    pub data_file: Option<PathBuf>,

    /// Keep the repository in memory only when false
    pub persist: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            root_path: "/content/documents/bookstore/books".to_string(),
            data_file: None,
            persist: true,
        }
    }
}

impl RepositoryConfig {
    pub fn root(&self) -> BookstoreResult<NodePath> {
        NodePath::parse(&self.root_path)
    }

    /// Data file to use, `None` when persistence is off
    pub fn data_file_path(&self) -> Option<PathBuf> {
        if !self.persist {
            return None;
        }
        Some(
            self.data_file
                .clone()
                .unwrap_or_else(ConfigManager::default_data_file),
        )
    }
}

/// Catalog validation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Required ISBN length in characters
    pub isbn_length: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { isbn_length: 13 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[repository]"));
        assert!(toml.contains("isbn_length = 13"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [repository]
            root_path = "/books"
            persist = false
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.repository.root().unwrap().depth(), 1);
        assert!(config.repository.data_file_path().is_none());
        assert_eq!(config.catalog.isbn_length, 13); // default preserved
    }

    #[test]
    fn explicit_data_file_wins() {
        let mut config = RepositoryConfig::default();
        config.data_file = Some(PathBuf::from("/tmp/books.json"));
        assert_eq!(config.data_file_path(), Some(PathBuf::from("/tmp/books.json")));
    }

    #[test]
    fn validate_rejects_unusable_values() {
        let mut config = Config::default();
        config.server.bind = "not-an-address".to_string();
        assert!(config.validate().unwrap_err().contains("server.bind"));

        let mut config = Config::default();
        config.repository.root_path = "/".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.catalog.isbn_length = 0;
        assert!(config.validate().is_err());
    }
}
