//! Directory helpers

use std::fs;
use std::io;
use std::path::Path;

use super::errors::{FileError, FileResult};

/// Names of the directories directly inside `path`, sorted
pub fn dirnames(path: &Path) -> FileResult<Vec<String>> {
    let entries = fs::read_dir(path).map_err(|e| FileError::io(path, e))?;
    let mut names = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| FileError::io(path, e))?;
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}

/// Create `path` and any missing parents; succeeds if it already is a directory
pub fn mkdir_p(path: &Path) -> FileResult<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(FileError::io(path, e)),
    }
}

/// Remove everything inside `dir`, keeping `dir` itself
///
/// Returns the sorted top-level names removed. With `simulate` nothing is
/// touched and the names that would be removed are returned.
pub fn clean_directory(dir: &Path, simulate: bool) -> FileResult<Vec<String>> {
    if !dir.is_dir() {
        return Err(FileError::MissingDirectory(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| FileError::io(dir, e))? {
        let entry = entry.map_err(|e| FileError::io(dir, e))?;
        entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    entries.sort();

    if !simulate {
        for (_, path) in &entries {
            let removed = if path.is_dir() {
                fs::remove_dir_all(path)
            } else {
                fs::remove_file(path)
            };
            removed.map_err(|e| FileError::io(path, e))?;
        }
        tracing::info!(dir = %dir.display(), removed = entries.len(), "cleaned directory");
    }

    Ok(entries.into_iter().map(|(name, _)| name).collect())
}
