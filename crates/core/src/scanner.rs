use crate::media::{ExtensionClassifier, FileEntry};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Lists the regular files directly inside `root`, skipping `exclude`
/// (normally the running executable).
pub fn scan_directory(
    root: &Path,
    exclude: Option<&Path>,
    classifier: &ExtensionClassifier,
) -> Result<Vec<FileEntry>> {
    let excluded = exclude.and_then(|path| fs::canonicalize(path).ok());
    let mut paths = Vec::<PathBuf>::new();

    for entry in
        fs::read_dir(root).with_context(|| format!("フォルダを読めませんでした: {}", root.display()))?
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = %root.display(), %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(excluded) = excluded.as_deref() {
            if fs::canonicalize(&path).is_ok_and(|canonical| canonical == excluded) {
                continue;
            }
        }
        paths.push(path);
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| FileEntry::new(path, classifier))
        .collect())
}
