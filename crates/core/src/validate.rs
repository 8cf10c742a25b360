use std::fs;
use std::path::Path;

/// Result of probing one directory. Always a returned value; the probe never
/// panics or propagates an error for these conditions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    NotFound,
    AccessDenied,
}

impl ValidationOutcome {
    pub fn is_ok(self) -> bool {
        self == ValidationOutcome::Ok
    }
}

/// How much access a directory must grant to pass validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    ReadWrite,
}

/// Check that `path` is a directory we can list, and for
/// [`Access::ReadWrite`] also create entries in.
///
/// Many filesystems report a directory as existing and listable even when
/// write access is denied, so the write check actually creates a randomized
/// subdirectory and immediately removes it again. `tempfile` picks the
/// random name, retries the rare collision, and guarantees removal.
pub fn validate_directory(path: &Path, access: Access) -> ValidationOutcome {
    if !path.is_dir() {
        return ValidationOutcome::NotFound;
    }

    match fs::read_dir(path) {
        Ok(entries) => {
            for entry in entries {
                if entry.is_err() {
                    return ValidationOutcome::AccessDenied;
                }
            }
        }
        Err(_) => return ValidationOutcome::AccessDenied,
    }

    if access == Access::ReadWrite {
        let probe = match tempfile::tempdir_in(path) {
            Ok(probe) => probe,
            Err(_) => return ValidationOutcome::AccessDenied,
        };
        if probe.close().is_err() {
            return ValidationOutcome::AccessDenied;
        }
    }

    ValidationOutcome::Ok
}
