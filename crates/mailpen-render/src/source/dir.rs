//! Filesystem-backed template source.

use std::path::{Path, PathBuf};

use super::{dir_prefix, Source, SourceError};
use crate::naming::is_valid_path;

/// A source reading templates from a directory on disk.
///
/// Nothing is cached: every walk and read goes to the filesystem, so edits
/// become visible the next time the engine rebuilds or resolves.
///
/// ```rust,ignore
/// let source = DirSource::new("brand", "./mail-templates");
/// engine.add_source(source)?;
/// ```
#[derive(Debug, Clone)]
pub struct DirSource {
    name: String,
    root: PathBuf,
}

impl DirSource {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a source-relative path under the root.
    ///
    /// Leading and trailing slashes are ignored. `None` for any path with a
    /// `.`, `..` or empty segment.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Some(self.root.clone());
        }
        if !is_valid_path(path) {
            return None;
        }
        Some(path.split('/').fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }

    fn not_found(&self, path: &str) -> SourceError {
        SourceError::NotFound {
            source_name: self.name.clone(),
            path: path.to_string(),
        }
    }

    fn io_error(&self, path: &Path, error: std::io::Error) -> SourceError {
        SourceError::Io {
            source_name: self.name.clone(),
            path: path.to_path_buf(),
            error,
        }
    }

    fn walk_recursive(
        &self,
        current: &Path,
        relative: &str,
        files: &mut Vec<String>,
    ) -> Result<(), SourceError> {
        let entries = std::fs::read_dir(current).map_err(|e| self.io_error(current, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| self.io_error(current, e))?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let child = format!("{}{}", relative, file_name);

            if path.is_dir() {
                self.walk_recursive(&path, &format!("{}/", child), files)?;
            } else if path.is_file() {
                files.push(child);
            }
        }

        Ok(())
    }
}

impl Source for DirSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|full| full.is_file())
    }

    fn walk(&self, root: &str) -> Result<Vec<String>, SourceError> {
        let Some(dir) = self.resolve(root).filter(|dir| dir.is_dir()) else {
            return Ok(Vec::new());
        };

        let mut files = Vec::new();
        self.walk_recursive(&dir, &dir_prefix(root), &mut files)?;
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<String, SourceError> {
        let full = self.resolve(path).ok_or_else(|| self.not_found(path))?;
        std::fs::read_to_string(&full).map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                self.not_found(path)
            } else {
                self.io_error(&full, error)
            }
        })
    }
}
