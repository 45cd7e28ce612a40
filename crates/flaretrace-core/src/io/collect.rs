use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, warn};

use crate::error::{FlareError, Result};

/// Collect observation files under `dir` matching `pattern`, sorted
/// lexicographically by full path. The sort order defines the
/// chronological frame order for the whole run.
pub fn collect_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = dir.join(pattern).to_string_lossy().into_owned();

    let mut paths = Vec::new();
    for entry in glob(&full_pattern)? {
        match entry {
            Ok(path) => paths.push(path),
            Err(err) => warn!(%err, "skipping unreadable path"),
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(FlareError::NoFilesFound {
            dir: dir.display().to_string(),
            pattern: pattern.to_string(),
        });
    }

    debug!(count = paths.len(), pattern = %full_pattern, "collected input files");
    Ok(paths)
}
