//! In-memory and compile-time embedded sources.

use std::collections::BTreeMap;

use super::{dir_prefix, Source, SourceError};

/// A source holding its files in memory.
///
/// # Example
///
/// ```rust
/// use mailpen_render::{MemorySource, Source};
///
/// let source = MemorySource::new("override")
///     .with_file("components/header.html", "<h1>{{ title }}</h1>")
///     .with_file("emails/welcome.txt", "Hi {{ Name }}");
///
/// assert!(source.exists("emails/welcome.txt"));
/// assert_eq!(source.walk("components").unwrap(), vec!["components/header.html"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
        }
    }

    /// Adds a file, returning `self` for chaining.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        self.files
            .insert(path.trim_start_matches('/').to_string(), content.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Source for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn walk(&self, root: &str) -> Result<Vec<String>, SourceError> {
        let prefix = dir_prefix(root);
        Ok(self
            .files
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .cloned()
            .collect())
    }

    fn read(&self, path: &str) -> Result<String, SourceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                source_name: self.name.clone(),
                path: path.to_string(),
            })
    }
}

/// A source over `(path, content)` pairs baked into the binary.
///
/// Entries typically come from `include_str!`, so templates ship inside a
/// single executable while keeping the same directory convention as a
/// [`DirSource`](super::DirSource).
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl EmbeddedSource {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, entries }
    }

    fn entry(&self, path: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(entry_path, _)| *entry_path == path)
            .map(|(_, content)| *content)
    }
}

impl Source for EmbeddedSource {
    fn name(&self) -> &str {
        self.name
    }

    fn exists(&self, path: &str) -> bool {
        self.entry(path).is_some()
    }

    fn walk(&self, root: &str) -> Result<Vec<String>, SourceError> {
        let prefix = dir_prefix(root);
        let mut files: Vec<String> = self
            .entries
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(path, _)| path.to_string())
            .collect();
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<String, SourceError> {
        self.entry(path)
            .map(str::to_string)
            .ok_or_else(|| SourceError::NotFound {
                source_name: self.name.to_string(),
                path: path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_walk_only_matches_directory_prefix() {
        let source = MemorySource::new("mem")
            .with_file("layouts/base.html", "a")
            .with_file("layouts-old/base.html", "b")
            .with_file("layouts/nested/wide.txt", "c");

        assert_eq!(
            source.walk("layouts").unwrap(),
            vec!["layouts/base.html", "layouts/nested/wide.txt"]
        );
    }

    #[test]
    fn test_memory_insert_replaces() {
        let mut source = MemorySource::new("mem").with_file("emails/a.txt", "one");
        source.insert("/emails/a.txt", "two");
        assert_eq!(source.len(), 1);
        assert_eq!(source.read("emails/a.txt").unwrap(), "two");
    }

    #[test]
    fn test_memory_read_missing() {
        let source = MemorySource::new("mem");
        assert!(source.is_empty());
        assert!(matches!(
            source.read("emails/a.txt"),
            Err(SourceError::NotFound { .. })
        ));
    }

    #[test]
    fn test_embedded_source() {
        static ENTRIES: &[(&str, &str)] = &[
            ("partials/sig.txt", "-- sig"),
            ("emails/hello.txt", "hello"),
            ("partials/a.txt", "a"),
        ];
        let source = EmbeddedSource::new("embedded", ENTRIES);

        assert_eq!(source.name(), "embedded");
        assert!(source.exists("emails/hello.txt"));
        assert_eq!(
            source.walk("partials").unwrap(),
            vec!["partials/a.txt", "partials/sig.txt"]
        );
        assert_eq!(source.read("partials/sig.txt").unwrap(), "-- sig");
        assert!(source.walk("components").unwrap().is_empty());
    }
}
