//! Directory scanning helpers shared by the planners

use std::path::{Path, PathBuf};

use forgekit_core::{Error, Result};

/// Entries of a directory, sorted by file name so plans are
/// deterministic regardless of filesystem order
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    entries.sort();
    Ok(entries)
}

/// File name of a path as UTF-8, or `None` for paths without one
pub(crate) fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sorted_entries_are_ordered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.fbs"), "").unwrap();
        fs::write(dir.path().join("a.fbs"), "").unwrap();
        fs::write(dir.path().join("c.fbs"), "").unwrap();

        let names: Vec<String> = sorted_entries(dir.path())
            .unwrap()
            .iter()
            .filter_map(|p| file_name(p))
            .collect();
        assert_eq!(names, ["a.fbs", "b.fbs", "c.fbs"]);
    }

    #[test]
    fn test_missing_dir_is_error() {
        let err = sorted_entries(Path::new("/nonexistent/forgekit")).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }
}
