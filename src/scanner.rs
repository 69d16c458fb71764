use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Lists the archives directly inside `dir`, sorted by file name.
///
/// Only regular files whose name ends in `.{extension}` are kept;
/// subdirectories are not descended into.
pub fn find_archives(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read input directory {}", dir.display()))?;

    let mut archives = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list {}", dir.display()))?
            .path();
        if path.is_file() && has_extension(&path, extension) {
            archives.push(path);
        } else {
            tracing::trace!(path = %path.display(), "ignoring");
        }
    }
    archives.sort();
    Ok(archives)
}

/// Suffix match on the whole file name, so a bare `.ipa` still counts.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(extension))
        .is_some_and(|stem| stem.ends_with('.'))
}
