//! Where the config file lives and how it is read and written

pub mod schema;

pub use schema::Config;

use crate::error::{BookstoreError, BookstoreResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const APP_DIR: &str = "bookstore";

/// Locates, loads and saves the TOML config.
///
/// A path given with `--config` (or `BOOKSTORE_CONFIG`) must exist; the
/// default location may be absent, in which case defaults apply.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    explicit: bool,
}

impl ConfigManager {
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        match explicit {
            Some(config_path) => Self {
                config_path,
                explicit: true,
            },
            None => Self {
                config_path: Self::default_config_path(),
                explicit: false,
            },
        }
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Directory for the repository data file
    pub fn state_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn default_data_file() -> PathBuf {
        Self::state_dir().join("repository.json")
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub async fn load(&self) -> BookstoreResult<Config> {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !self.explicit => {
                debug!("No config at {}, using defaults", self.config_path.display());
                return Ok(Config::default());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BookstoreError::ConfigNotFound(self.config_path.clone()));
            }
            Err(e) => {
                return Err(BookstoreError::io(
                    format!("reading config from {}", self.config_path.display()),
                    e,
                ))
            }
        };

        parse(&self.config_path, &content)
    }

    /// Write `config`, replacing the file only once the new content is on disk
    pub async fn save(&self, config: &Config) -> BookstoreResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BookstoreError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        let staged = self.config_path.with_extension("toml.tmp");
        fs::write(&staged, content)
            .await
            .map_err(|e| BookstoreError::io(format!("writing {}", staged.display()), e))?;
        fs::rename(&staged, &self.config_path).await.map_err(|e| {
            BookstoreError::io(format!("replacing {}", self.config_path.display()), e)
        })?;

        info!(path = %self.config_path.display(), "config saved");
        Ok(())
    }
}

/// Parse and validate config text read from `path`
fn parse(path: &Path, content: &str) -> BookstoreResult<Config> {
    let invalid = |reason: String| BookstoreError::ConfigInvalid {
        path: path.to_path_buf(),
        reason,
    };

    let config: Config = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;
    config.validate().map_err(invalid)?;
    Ok(config)
}
