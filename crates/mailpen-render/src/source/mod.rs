//! Template sources.
//!
//! A source is a named, read-only tree of template files. The engine keeps
//! sources in registration order; later sources override earlier ones.
//!
//! # Directory Convention
//!
//! Every source may provide any subset of four top-level directories:
//!
//! ```text
//! layouts/      layout:<path>     merged into the base set
//! components/   component:<path>  merged into the base set
//! partials/     partial:<path>    merged into the base set
//! emails/       <path>            resolved per document
//! ```
//!
//! Paths are always `/`-separated and relative to the source root, whatever
//! the backing store. A missing directory is an empty directory.
//!
//! # Implementations
//!
//! | Type | Backing store |
//! |------|---------------|
//! | [`DirSource`] | A directory on disk, re-read on every walk |
//! | [`MemorySource`] | Owned in-memory files, handy in tests |
//! | [`EmbeddedSource`] | `&'static` entries baked into the binary |

mod dir;
mod memory;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub use dir::DirSource;
pub use memory::{EmbeddedSource, MemorySource};

/// Errors raised while walking or reading a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested file does not exist in the source.
    #[error("{path} not found in source {source_name:?}")]
    NotFound { source_name: String, path: String },

    /// An I/O failure while accessing the backing store.
    #[error("failed to read {} from source {source_name:?}: {error}", path.display())]
    Io {
        source_name: String,
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

/// A named, read-only hierarchical file collection.
pub trait Source: Send + Sync {
    /// Diagnostic name. Not required to be unique.
    fn name(&self) -> &str;

    /// Whether a file exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Recursively lists files under `root`, sorted, as source-relative paths.
    ///
    /// A missing `root` yields an empty list, not an error.
    fn walk(&self, root: &str) -> Result<Vec<String>, SourceError>;

    /// Reads the file at `path`.
    fn read(&self, path: &str) -> Result<String, SourceError>;
}

/// Shared handle to a registered source.
#[derive(Clone)]
pub struct TemplateSource(Arc<dyn Source>);

impl TemplateSource {
    pub fn new(source: impl Source + 'static) -> Self {
        Self(Arc::new(source))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.0.exists(path)
    }

    pub fn walk(&self, root: &str) -> Result<Vec<String>, SourceError> {
        self.0.walk(root)
    }

    pub fn read(&self, path: &str) -> Result<String, SourceError> {
        self.0.read(path)
    }
}

impl fmt::Debug for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TemplateSource").field(&self.name()).finish()
    }
}

impl<S: Source + 'static> From<S> for TemplateSource {
    fn from(source: S) -> Self {
        Self::new(source)
    }
}

/// Normalizes a root directory to a `prefix/` form (empty for the source root).
pub(crate) fn dir_prefix(root: &str) -> String {
    let trimmed = root.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_prefix() {
        assert_eq!(dir_prefix("layouts"), "layouts/");
        assert_eq!(dir_prefix("/layouts/"), "layouts/");
        assert_eq!(dir_prefix(""), "");
    }

    #[test]
    fn test_template_source_debug_shows_name() {
        let source = TemplateSource::new(MemorySource::new("brand"));
        assert_eq!(format!("{:?}", source), "TemplateSource(\"brand\")");
    }
}
