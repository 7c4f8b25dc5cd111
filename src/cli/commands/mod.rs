//! CLI command implementations

pub mod config;
pub mod import;
pub mod list;
pub mod serve;

pub use config::execute as config;
pub use import::execute as import;
pub use list::execute as list;
pub use serve::execute as serve;

use crate::config::Config;
use std::path::PathBuf;

/// Apply a `--data-file` override; an explicit file also turns persistence on
pub(crate) fn with_data_file(config: &Config, data_file: Option<PathBuf>) -> Config {
    let mut config = config.clone();
    if let Some(path) = data_file {
        config.repository.data_file = Some(path);
        config.repository.persist = true;
    }
    config
}
