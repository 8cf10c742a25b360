use std::fs;
use std::path::{Path, PathBuf};

use crate::LoggingLevel;

/// File name looked up when no path is given on the command line.
pub const CONFIG_FILE_NAME: &str = "copia.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found at '{0}'")]
    NotFound(PathBuf),
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config file '{path}' is not formed correctly: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Directories to back up. A bare string is accepted as a one-element
    /// list.
    #[serde(deserialize_with = "one_or_many")]
    pub source_directories: Vec<PathBuf>,
    /// Directory the timestamped copies are created under.
    pub destination_directory: PathBuf,
    #[serde(default)]
    pub logging_level: LoggingLevel,
    #[serde(default)]
    pub logging_directory: Option<PathBuf>,
}

impl Config {
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Result<Config, ConfigError> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: PathBuf) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.clone())
            } else {
                ConfigError::Read {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        let config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;

        log::debug!("Using config file `{}`", path.display());
        Ok(config)
    }
}

/// Resolve the config file path: an explicit argument wins, then
/// `copia.json` in the current directory, then the per-user data directory.
///
/// An explicit path is returned as-is; loading reports it missing. The
/// discovery candidates are only returned when they exist.
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let fallback = dirs::data_local_dir()?.join("copia").join(CONFIG_FILE_NAME);
    if fallback.is_file() {
        return Some(fallback);
    }

    None
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PathBuf),
        Many(Vec<PathBuf>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}
