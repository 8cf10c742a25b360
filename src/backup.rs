use copia_config::Config;
use copia_core::{CancelToken, RunResult, SanitizeError, ValidationOutcome};

/// Suffix appended to each source's base name when naming its copy,
/// rendered through `chrono`.
pub const TIME_FORMAT: &str = " copy from %Y-%m-%d_%H-%M-%S";

/// Run one backup: validate the destination, sanitize the source list, then
/// copy each surviving source into its own timestamped subtree.
///
/// Only an unusable destination is fatal. Invalid sources are logged and
/// dropped; per-file and per-directory failures are accounted in the
/// returned stats.
pub fn backup(config: &Config, cancel: &CancelToken) -> Result<RunResult, SanitizeError> {
    copia_core::clean_destination(&config.destination_directory)?;

    let (sources, rejected) =
        copia_core::clean_sources(&config.source_directories, &config.destination_directory);
    for (path, outcome) in &rejected {
        let reason = match outcome {
            ValidationOutcome::NotFound => "does not exist",
            _ => "is inaccessible",
        };
        log::warn!("Source directory '{}' {reason}", path.display());
    }

    Ok(copia_core::make_copies(
        &sources,
        &config.destination_directory,
        TIME_FORMAT,
        cancel,
    ))
}
