use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::allocate::{AllocError, allocate_unique_dir};
use crate::copy::{CancelToken, CopyStats, copy_tree};

/// Per-run accounting, keyed by each processed source's full path. Sources
/// that were skipped (vanished, or no destination name could be allocated)
/// have no entry.
pub type RunResult = BTreeMap<PathBuf, CopyStats>;

/// Copy every source directory into a freshly allocated, uniquely named
/// subtree under `dest_root`, one source at a time.
///
/// The desired name is the source's base name plus the current time rendered
/// through `time_format` (a `chrono` format string). Each source's existence
/// is re-checked right before processing; the filesystem may have changed
/// since sanitization.
pub fn make_copies(
    sources: &[PathBuf],
    dest_root: &Path,
    time_format: &str,
    cancel: &CancelToken,
) -> RunResult {
    let mut results = RunResult::new();

    for source in sources {
        if cancel.is_cancelled() {
            break;
        }

        if !source.is_dir() {
            log::warn!("Directory '{}' does not exist", source.display());
            continue;
        }

        let base_name = source
            .file_name()
            .unwrap_or(source.as_os_str())
            .to_string_lossy();
        let desired = format!("{}{}", base_name, Local::now().format(time_format));

        let target = match allocate_unique_dir(dest_root, &desired) {
            Ok(target) => target,
            Err(AllocError::DuplicateName(_)) => {
                log::warn!(
                    "Directory '{}' cannot be copied due to its name",
                    source.display()
                );
                continue;
            }
            Err(AllocError::PathTooLong(_)) => {
                log::warn!(
                    "Directory '{}' cannot be copied because the path is too long",
                    source.display()
                );
                continue;
            }
            Err(AllocError::Io(e)) => {
                log::warn!("Directory '{}' cannot be copied: {e}", source.display());
                continue;
            }
        };

        let stats = copy_tree(source, &target, cancel);
        results.insert(source.clone(), stats);
        log::info!("Copied directory '{}'", source.display());
    }

    results
}
