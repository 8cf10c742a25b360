pub use copia_config::{Config, ConfigError, LoggingLevel, find_config_file};
pub use copia_core::{
    CancelToken, CopyStats, RunResult, SanitizeError, ValidationOutcome, clean_logging_directory,
};

mod backup;

pub use backup::{TIME_FORMAT, backup};
