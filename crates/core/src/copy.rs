use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag, checked between file operations so a run
/// can be interrupted without leaving a half-written file behind.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-subtree accounting. Invariant: `copied + failed` equals the number of
/// files encountered in the subtree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: u64,
    pub failed: u64,
}

impl CopyStats {
    fn fold(mut self, child: CopyStats) -> CopyStats {
        self.copied += child.copied;
        self.failed += child.failed;
        self
    }
}

/// Mirror the tree rooted at `source` under `dest`, copying every file and
/// recursing into every subdirectory.
///
/// Failures stay local: a file that cannot be copied bumps the fail counter
/// and the walk moves on; a directory that cannot be listed is logged and
/// contributes whatever was accumulated up to that point. Nothing here
/// aborts the caller.
///
/// A subdirectory that `dest` itself lives under (or is) is skipped, so a
/// destination nested inside the tree being copied never gets re-copied
/// into itself. The check is a path-prefix comparison on the given paths;
/// it does not resolve symlinks or case folding.
pub fn copy_tree(source: &Path, dest: &Path, cancel: &CancelToken) -> CopyStats {
    let mut stats = CopyStats::default();

    if let Err(e) = fs::create_dir_all(dest) {
        log::warn!("Directory '{}' is inaccessible: {e}", dest.display());
        return stats;
    }

    let (files, dirs) = match list_children(source) {
        Ok(children) => children,
        Err(e) => {
            log::warn!("Directory '{}' is inaccessible: {e}", source.display());
            return stats;
        }
    };

    for file in files {
        if cancel.is_cancelled() {
            return stats;
        }
        let Some(name) = file.file_name() else {
            continue;
        };
        match copy_file_no_overwrite(&file, &dest.join(name)) {
            Ok(()) => {
                stats.copied += 1;
                log::debug!("Copied file '{}'", file.display());
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                stats.failed += 1;
                log::warn!("Access denied to '{}'", file.display());
            }
            Err(e) => {
                stats.failed += 1;
                log::warn!("Error occurred while copying '{}': {e}", file.display());
            }
        }
    }

    for dir in dirs {
        if cancel.is_cancelled() {
            return stats;
        }
        // Self-containment guard: never descend into the destination.
        if dest.starts_with(&dir) {
            continue;
        }
        let Some(name) = dir.file_name() else {
            continue;
        };
        stats = stats.fold(copy_tree(&dir, &dest.join(name), cancel));
    }

    stats
}

/// Immediate children of `dir`, split into files and subdirectories, each
/// list in ascending path-length order (ties broken lexicographically) so
/// runs are reproducible.
fn list_children(dir: &Path) -> io::Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        } else {
            files.push(entry.path());
        }
    }

    let by_length = |p: &PathBuf| (p.as_os_str().len(), p.clone());
    files.sort_by_key(by_length);
    dirs.sort_by_key(by_length);

    Ok((files, dirs))
}

/// Copy one file without ever replacing an existing destination; a name
/// collision is an error, not a silent overwrite. Permission bits are
/// carried over best-effort.
fn copy_file_no_overwrite(source: &Path, dest: &Path) -> io::Result<()> {
    let mut reader = fs::File::open(source)?;
    let mut writer = fs::File::create_new(dest)?;
    io::copy(&mut reader, &mut writer)?;
    if let Ok(metadata) = reader.metadata() {
        let _ = writer.set_permissions(metadata.permissions());
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_tree(root: &Path) {
        fs::write(root.join("file.bin"), b"0").unwrap();
        fs::create_dir(root.join("1")).unwrap();
        fs::write(root.join("1").join("file2.bin"), b"1").unwrap();
        fs::create_dir(root.join("2")).unwrap();
        fs::create_dir(root.join("2").join("deep")).unwrap();
        fs::write(root.join("2").join("deep").join("file3.bin"), b"2").unwrap();
        fs::write(root.join("2").join("file4.bin"), b"3").unwrap();
    }

    #[test]
    fn copies_whole_tree() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir(&source).unwrap();
        sample_tree(&source);
        let dest = dir.path().join("dest");

        let stats = copy_tree(&source, &dest, &CancelToken::new());

        assert_eq!(
            stats,
            CopyStats {
                copied: 4,
                failed: 0
            }
        );
        assert!(dest.join("file.bin").is_file());
        assert!(dest.join("1").join("file2.bin").is_file());
        assert!(dest.join("2").join("deep").join("file3.bin").is_file());
        assert!(dest.join("2").join("file4.bin").is_file());
    }

    #[test]
    fn existing_destination_file_counts_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir(&source).unwrap();
        sample_tree(&source);
        let dest = dir.path().join("dest");
        fs::create_dir_all(dest.join("1")).unwrap();
        fs::write(dest.join("1").join("file2.bin"), b"already here").unwrap();

        let stats = copy_tree(&source, &dest, &CancelToken::new());

        assert_eq!(
            stats,
            CopyStats {
                copied: 3,
                failed: 1
            }
        );
        // The colliding file is left untouched.
        assert_eq!(
            fs::read(dest.join("1").join("file2.bin")).unwrap(),
            b"already here"
        );
    }

    #[test]
    fn broken_symlink_counts_as_failure() {
        #[cfg(unix)]
        {
            let dir = tempfile::tempdir().unwrap();
            let source = dir.path().join("source");
            fs::create_dir(&source).unwrap();
            fs::write(source.join("good.bin"), b"0").unwrap();
            std::os::unix::fs::symlink(source.join("gone"), source.join("dangling")).unwrap();

            let stats = copy_tree(&source, &dir.path().join("dest"), &CancelToken::new());

            assert_eq!(
                stats,
                CopyStats {
                    copied: 1,
                    failed: 1
                }
            );
        }
    }

    #[test]
    fn destination_inside_source_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir(&source).unwrap();
        sample_tree(&source);
        let dest = source.join("backup");

        let stats = copy_tree(&source, &dest, &CancelToken::new());

        assert_eq!(
            stats,
            CopyStats {
                copied: 4,
                failed: 0
            }
        );
        // The freshly created destination was not walked into itself.
        assert!(!dest.join("backup").exists());
        assert!(dest.join("2").join("file4.bin").is_file());
    }

    #[test]
    fn destination_equal_to_source_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("file.bin"), b"0").unwrap();

        let stats = copy_tree(&source, &source, &CancelToken::new());

        // The only file collides with itself.
        assert_eq!(
            stats,
            CopyStats {
                copied: 0,
                failed: 1
            }
        );
    }

    #[test]
    fn cancelled_token_stops_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir(&source).unwrap();
        sample_tree(&source);
        let cancel = CancelToken::new();
        cancel.cancel();

        let stats = copy_tree(&source, &dir.path().join("dest"), &cancel);

        assert_eq!(stats, CopyStats::default());
    }

    #[test]
    fn empty_source_copies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir(&source).unwrap();
        let dest = dir.path().join("dest");

        let stats = copy_tree(&source, &dest, &CancelToken::new());

        assert_eq!(stats, CopyStats::default());
        assert!(dest.is_dir());
    }
}
