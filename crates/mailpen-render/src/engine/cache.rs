//! Resolution cache.
//!
//! Resolved documents are memoized by `(format, document, layout)`. The cache
//! is only ever cleared as a whole: a new source can redefine any layout,
//! component or partial a cached document reaches transitively.

use std::collections::HashMap;
use std::sync::Arc;

use super::resolve::ResolvedDocument;
use crate::format::Format;

/// Key of a cached resolved document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub format: Format,
    pub document: String,
    pub layout: String,
}

impl CacheKey {
    pub fn new(format: Format, document: impl Into<String>, layout: impl Into<String>) -> Self {
        Self {
            format,
            document: document.into(),
            layout: layout.into(),
        }
    }
}

#[derive(Default)]
pub(crate) struct ResolutionCache {
    entries: HashMap<CacheKey, Arc<ResolvedDocument>>,
}

impl ResolutionCache {
    pub(crate) fn get(&self, key: &CacheKey) -> Option<Arc<ResolvedDocument>> {
        self.entries.get(key).cloned()
    }

    /// Stores `document` unless an entry already exists, returning the
    /// entry that is now cached.
    pub(crate) fn insert(
        &mut self,
        key: CacheKey,
        document: Arc<ResolvedDocument>,
    ) -> Arc<ResolvedDocument> {
        Arc::clone(self.entries.entry(key).or_insert(document))
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &CacheKey> {
        self.entries.keys()
    }
}
