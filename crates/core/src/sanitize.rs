use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::validate::{Access, ValidationOutcome, validate_directory};

#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    #[error("destination directory '{0}' does not exist")]
    DestinationNotFound(PathBuf),
    #[error("destination directory '{0}' is not accessible for writing")]
    DestinationInaccessible(PathBuf),
}

/// Deduplicate and validate the raw source list, keeping first-occurrence
/// order. Paths that fail validation are dropped and returned alongside
/// their outcome so the caller can report every one of them.
///
/// If the destination itself is among the sources it is swapped to the
/// front: it must be copied before the run starts creating new
/// subdirectories inside it, or those would be walked and copied too.
pub fn clean_sources(
    raw: &[PathBuf],
    destination: &Path,
) -> (Vec<PathBuf>, Vec<(PathBuf, ValidationOutcome)>) {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();
    let mut rejected = Vec::new();

    for path in raw {
        if !seen.insert(path.clone()) {
            continue;
        }
        match validate_directory(path, Access::Read) {
            ValidationOutcome::Ok => cleaned.push(path.clone()),
            outcome => rejected.push((path.clone(), outcome)),
        }
    }

    if let Some(index) = cleaned.iter().position(|p| p == destination) {
        cleaned.swap(0, index);
    }

    (cleaned, rejected)
}

/// The destination must exist and be writable; anything else is fatal for
/// the whole run.
pub fn clean_destination(path: &Path) -> Result<(), SanitizeError> {
    match validate_directory(path, Access::ReadWrite) {
        ValidationOutcome::Ok => Ok(()),
        ValidationOutcome::NotFound => Err(SanitizeError::DestinationNotFound(path.to_path_buf())),
        ValidationOutcome::AccessDenied => {
            Err(SanitizeError::DestinationInaccessible(path.to_path_buf()))
        }
    }
}

/// An unusable logging directory is recoverable: the offending outcome is
/// reported and `None` comes back, so the caller can fall back to the
/// working directory instead of aborting.
pub fn clean_logging_directory(
    path: Option<&Path>,
) -> (Option<PathBuf>, Option<ValidationOutcome>) {
    match path {
        None => (None, None),
        Some(path) => match validate_directory(path, Access::ReadWrite) {
            ValidationOutcome::Ok => (Some(path.to_path_buf()), None),
            outcome => (None, Some(outcome)),
        },
    }
}
