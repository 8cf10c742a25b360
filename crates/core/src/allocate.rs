use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Upper bound on ` (n)` suffixes tried before giving up on a name.
const MAX_NAME_ATTEMPTS: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum AllocError {
    #[error("every candidate name for '{0}' is already taken")]
    DuplicateName(PathBuf),
    #[error("path '{0}' exceeds the filesystem's length limit")]
    PathTooLong(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Create a new, empty directory named `desired_name` under `base_dir`,
/// returning its path.
///
/// If the name is taken, ` (1)`, ` (2)`, … ` (1000)` are tried in order and
/// the first free candidate wins; exhausting them is [`AllocError::DuplicateName`].
/// Creation itself is the existence test, so a concurrently appearing
/// directory simply moves the search to the next candidate. Missing
/// components of `base_dir` are created first.
pub fn allocate_unique_dir(base_dir: &Path, desired_name: &str) -> Result<PathBuf, AllocError> {
    fs::create_dir_all(base_dir).map_err(|e| classify(e, base_dir))?;

    for n in 0..=MAX_NAME_ATTEMPTS {
        let candidate = if n == 0 {
            base_dir.join(desired_name)
        } else {
            base_dir.join(format!("{desired_name} ({n})"))
        };

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(classify(e, &candidate)),
        }
    }

    Err(AllocError::DuplicateName(base_dir.join(desired_name)))
}

fn classify(e: io::Error, path: &Path) -> AllocError {
    if e.kind() == io::ErrorKind::InvalidFilename {
        AllocError::PathTooLong(path.to_path_buf())
    } else {
        AllocError::Io(e)
    }
}
