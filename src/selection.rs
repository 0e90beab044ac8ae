use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::is_supported;
use crate::types::AddOutcome;

#[derive(Debug, Default)]
pub struct SelectionList {
    paths: Vec<PathBuf>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories are accepted as-is; files only when their extension is supported.
    pub fn add_path(&mut self, path: PathBuf) -> AddOutcome {
        if self.paths.contains(&path) {
            return AddOutcome::AlreadyPresent;
        }

        if !path.is_dir() && !is_supported(&path) {
            return AddOutcome::Unsupported;
        }

        self.paths.push(path);
        AddOutcome::Added
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Flattens the selection into the image files to convert, in selection order.
    ///
    /// Directories contribute the supported files directly inside them, sorted by
    /// name; subfolders are not scanned.
    pub fn expand(&self) -> Vec<PathBuf> {
        let mut result = Vec::new();

        for path in &self.paths {
            if path.is_dir() {
                result.extend(scan_directory(path));
            } else if is_supported(path) {
                result.push(path.clone());
            }
        }

        result
    }
}

fn scan_directory(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), err);
                None
            }
        })
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_supported(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_add_path_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.png");
        fs::write(&file, b"").unwrap();

        let mut selection = SelectionList::new();
        assert_eq!(selection.add_path(file.clone()), AddOutcome::Added);
        assert_eq!(selection.add_path(file.clone()), AddOutcome::AlreadyPresent);
        assert_eq!(selection.paths(), &[file]);
    }

    #[test]
    fn test_add_unsupported_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("readme.txt");
        fs::write(&file, b"hello").unwrap();

        let mut selection = SelectionList::new();
        assert_eq!(selection.add_path(file), AddOutcome::Unsupported);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_add_directory_unconditionally() {
        let temp = TempDir::new().unwrap();
        // Directory names are never checked against the extension list
        let dir = temp.path().join("holiday.2024");
        fs::create_dir(&dir).unwrap();

        let mut selection = SelectionList::new();
        assert_eq!(selection.add_path(dir.clone()), AddOutcome::Added);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_clear() {
        let temp = TempDir::new().unwrap();
        let mut selection = SelectionList::new();
        selection.add_path(temp.path().to_path_buf());
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_expand_directory_is_flat_and_filtered() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("b.JPG"), b"").unwrap();
        fs::write(dir.join("a.png"), b"").unwrap();
        fs::write(dir.join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.join("nested")).unwrap();
        fs::write(dir.join("nested").join("deep.png"), b"").unwrap();

        let mut selection = SelectionList::new();
        selection.add_path(dir.to_path_buf());

        assert_eq!(selection.expand(), vec![dir.join("a.png"), dir.join("b.JPG")]);
    }

    #[test]
    fn test_expand_keeps_selection_order() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("folder");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("inner.gif"), b"").unwrap();
        let single = temp.path().join("single.bmp");
        fs::write(&single, b"").unwrap();

        let mut selection = SelectionList::new();
        selection.add_path(single.clone());
        selection.add_path(folder.clone());

        assert_eq!(selection.expand(), vec![single, folder.join("inner.gif")]);
    }
}
