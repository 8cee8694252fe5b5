//! Configuration loading

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// File names searched for configuration
const CONFIG_FILE_NAMES: [&str; 2] = ["mergelog.toml", ".mergelog.toml"];

/// Configuration for mergelog
///
/// Every field has a default; command-line flags override file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog file path, relative to the working directory
    pub file: PathBuf,

    /// Branch whose history is scanned (checked-out branch when unset)
    pub branch: Option<String>,

    /// Include every commit instead of merge-request commits only
    pub all_commits: bool,

    /// Keep only the first line of each message
    pub short: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            branch: None,
            all_commits: false,
            short: false,
        }
    }
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    info!(path = %path.display(), "loading config");

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(ConfigError::Io(e)),
    };
    let config: Config = toml::from_str(&content).map_err(ConfigError::TomlError)?;

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Find a configuration file in a directory or its parents.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`          (e.g. `mergelog.toml`)
///   2. `<dir>/.github/<name>`  (e.g. `.github/mergelog.toml`)
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration or fall back to defaults
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    let Some(path) = find_config(dir) else {
        warn!(dir = %dir.display(), "no config found, using defaults");
        return (Config::default(), None);
    };

    match load_config(&path) {
        Ok(config) => (config, Some(path)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
            (Config::default(), None)
        }
    }
}
