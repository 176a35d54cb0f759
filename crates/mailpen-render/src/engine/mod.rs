//! The template resolution and rendering engine.
//!
//! [`Engine`] owns an ordered list of template sources, the per-format base
//! sets built from them, and a cache of resolved documents.
//!
//! # Control Flow
//!
//! ```text
//! add_source ─► rebuild both base sets ─► swap in, clear cache
//! render ─► cache lookup ─► (miss) resolve document ─► cache store ─► execute
//! ```
//!
//! # Concurrency
//!
//! The engine is `Send + Sync` and every method takes `&self`. Sources, base
//! sets and functions live in an immutable snapshot behind a reader/writer
//! lock together with the cache:
//!
//! - Renders hold the read lock only long enough to look up the cache or
//!   clone the snapshot handle. Resolution and execution run unlocked.
//! - Mutations are serialized by a separate mutex. A new snapshot is built
//!   unlocked and installed with a brief write lock that also clears the
//!   cache, so readers see either the old state or the new one.
//! - A resolve that finishes against a superseded snapshot is returned to
//!   its caller but never cached.
//!
//! # Example
//!
//! ```rust
//! use mailpen_render::{Engine, MemorySource};
//! use serde_json::json;
//!
//! let engine = Engine::builder()
//!     .include_builtin(false)
//!     .source(MemorySource::new("base").with_file("emails/welcome.html", "Hello {{ Name }}"))
//!     .source(MemorySource::new("override").with_file("emails/welcome.html", "Hi {{ Name }}!!"))
//!     .build()
//!     .unwrap();
//!
//! let email = engine.render("welcome", &json!({ "Name": "Ana" }), "").unwrap();
//! assert_eq!(email.html, "Hi Ana!!");
//! assert_eq!(email.text, "");
//! ```

mod base;
mod cache;
mod resolve;

use std::sync::Arc;

use minijinja::value::{FunctionArgs, FunctionResult};
use minijinja::Value;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, warn};

use crate::builtin::builtin_source;
use crate::error::{RenderError, TemplateError};
use crate::format::Format;
use crate::functions::FunctionRegistry;
use crate::naming::document_path;
use crate::processor::HtmlProcessor;
use crate::source::TemplateSource;
use crate::theme::Theme;

use base::BaseSets;
use cache::ResolutionCache;

pub use cache::CacheKey;
pub use resolve::{ResolvedDocument, ENTRY_POINT};

/// Layout used when a render does not name one.
pub const DEFAULT_LAYOUT: &str = "base";

/// The bodies produced by one render.
///
/// A format the document does not exist in is left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Taken from the data's top-level `Subject` string, if present.
    pub subject: Option<String>,
    pub text: String,
    pub html: String,
}

/// Immutable engine state; replaced wholesale on every mutation.
pub(crate) struct Snapshot {
    generation: u64,
    pub(crate) sources: Vec<TemplateSource>,
    functions: FunctionRegistry,
    pub(crate) base: BaseSets,
}

struct State {
    snapshot: Arc<Snapshot>,
    cache: ResolutionCache,
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    sources: Vec<TemplateSource>,
    functions: FunctionRegistry,
    theme: Theme,
    processor: Option<Box<dyn HtmlProcessor>>,
    default_layout: String,
    include_builtin: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            functions: FunctionRegistry::new(),
            theme: Theme::default(),
            processor: None,
            default_layout: DEFAULT_LAYOUT.to_string(),
            include_builtin: true,
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source. Later sources override earlier ones.
    pub fn source(mut self, source: impl Into<TemplateSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TemplateSource>,
    {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Registers a template function.
    pub fn function<F, Rv, Args>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: minijinja::functions::Function<Rv, Args> + Send + Sync + 'static,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.functions.insert(name, f);
        self
    }

    pub fn functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions.extend(functions);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the post-processor applied to every rendered HTML body.
    pub fn processor(mut self, processor: impl HtmlProcessor + 'static) -> Self {
        self.processor = Some(Box::new(processor));
        self
    }

    /// Sets the layout used when a render passes an empty layout name.
    ///
    /// An empty name keeps the current default.
    pub fn default_layout(mut self, layout: impl Into<String>) -> Self {
        let layout = layout.into();
        if !layout.is_empty() {
            self.default_layout = layout;
        }
        self
    }

    /// Whether the built-in layouts and components are registered as the
    /// first source. Defaults to `true`.
    pub fn include_builtin(mut self, include: bool) -> Self {
        self.include_builtin = include;
        self
    }

    /// Builds the engine, parsing every base template.
    ///
    /// # Errors
    ///
    /// Fails if any source cannot be walked or any base template fails to
    /// parse.
    pub fn build(self) -> Result<Engine, RenderError> {
        let mut sources = Vec::with_capacity(self.sources.len() + 1);
        if self.include_builtin {
            sources.push(TemplateSource::new(builtin_source()));
        }
        sources.extend(self.sources);

        let mut functions = FunctionRegistry::with_builtins();
        functions.extend(self.functions);

        let theme = Arc::new(self.theme);
        let base = BaseSets::build(&sources, &functions, &theme)?;

        debug!(
            sources = sources.len(),
            default_layout = self.default_layout.as_str(),
            "template engine ready"
        );

        Ok(Engine {
            state: RwLock::new(State {
                snapshot: Arc::new(Snapshot {
                    generation: 0,
                    sources,
                    functions,
                    base,
                }),
                cache: ResolutionCache::default(),
            }),
            mutation: Mutex::new(()),
            theme,
            processor: self.processor,
            default_layout: self.default_layout,
        })
    }
}

/// Resolves, caches and renders layered email templates.
pub struct Engine {
    state: RwLock<State>,
    mutation: Mutex<()>,
    theme: Arc<Theme>,
    processor: Option<Box<dyn HtmlProcessor>>,
    default_layout: String,
}

impl Engine {
    /// Creates an engine with the built-in templates and default theme.
    pub fn new() -> Result<Self, RenderError> {
        EngineBuilder::new().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Appends a source, rebuilding the base sets and clearing the cache.
    ///
    /// If the rebuild fails the source is not added and the engine keeps
    /// serving from its previous state.
    pub fn add_source(&self, source: impl Into<TemplateSource>) -> Result<(), RenderError> {
        let source = source.into();
        let name = source.name().to_string();
        self.mutate(|current| {
            let mut sources = current.sources.clone();
            sources.push(source);
            (sources, current.functions.clone())
        })?;
        debug!(source = name.as_str(), "added template source");
        Ok(())
    }

    /// Registers a template function, replacing any function of that name.
    ///
    /// Base sets are rebuilt so the function is visible to every template.
    pub fn add_function<F, Rv, Args>(&self, name: impl Into<String>, f: F) -> Result<(), RenderError>
    where
        F: minijinja::functions::Function<Rv, Args> + Send + Sync + 'static,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        let mut added = FunctionRegistry::new();
        added.insert(name, f);
        self.add_functions(added)
    }

    /// Registers several template functions with a single rebuild.
    pub fn add_functions(&self, functions: FunctionRegistry) -> Result<(), RenderError> {
        self.mutate(|current| {
            let mut merged = current.functions.clone();
            merged.extend(functions);
            (current.sources.clone(), merged)
        })
    }

    fn mutate<F>(&self, change: F) -> Result<(), RenderError>
    where
        F: FnOnce(&Snapshot) -> (Vec<TemplateSource>, FunctionRegistry),
    {
        let _guard = self.mutation.lock();
        let current = Arc::clone(&self.state.read().snapshot);
        let (sources, functions) = change(current.as_ref());

        let base = BaseSets::build(&sources, &functions, &self.theme).map_err(|err| {
            warn!(error = %err, "base template rebuild failed, keeping previous templates");
            err
        })?;

        let next = Arc::new(Snapshot {
            generation: current.generation + 1,
            sources,
            functions,
            base,
        });

        let mut state = self.state.write();
        state.snapshot = next;
        state.cache.clear();
        Ok(())
    }

    /// Resolves a document for one format, using the cache.
    ///
    /// An empty `layout` selects the default layout.
    ///
    /// # Errors
    ///
    /// [`RenderError::FormatNotFound`] when no source defines the document in
    /// this format, or a parse-phase [`TemplateError`] when its body is
    /// malformed.
    pub fn resolve(
        &self,
        name: &str,
        layout: &str,
        format: Format,
    ) -> Result<Arc<ResolvedDocument>, RenderError> {
        let (layout, layout_is_default) = self.layout_or_default(layout);
        let key = CacheKey::new(format, name, layout);

        let snapshot = {
            let state = self.state.read();
            if let Some(document) = state.cache.get(&key) {
                debug!(document = name, %format, layout, "resolution cache hit");
                return Ok(document);
            }
            Arc::clone(&state.snapshot)
        };

        debug!(document = name, %format, layout, "resolution cache miss");
        let document = resolve::resolve_document(&snapshot, name, layout, format, layout_is_default)?
            .ok_or_else(|| RenderError::FormatNotFound {
                path: document_path(name, format),
                format,
            })?;
        let document = Arc::new(document);

        let mut state = self.state.write();
        if state.snapshot.generation == snapshot.generation {
            Ok(state.cache.insert(key, document))
        } else {
            Ok(document)
        }
    }

    /// Renders a document in every format it exists in.
    ///
    /// Text is rendered first, then HTML, which is passed through the
    /// configured processor. A format the document is missing from is left
    /// empty; missing from both is [`RenderError::NotFound`]. Any parse,
    /// execute or process failure fails the whole render.
    pub fn render<T>(&self, name: &str, data: &T, layout: &str) -> Result<RenderedEmail, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(data)?;
        let context = Value::from_serialize(&data);

        let mut email = RenderedEmail {
            subject: data
                .get("Subject")
                .and_then(|subject| subject.as_str())
                .map(str::to_string),
            ..RenderedEmail::default()
        };

        let mut found = false;
        for format in Format::ALL {
            let document = match self.resolve(name, layout, format) {
                Ok(document) => document,
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err),
            };
            found = true;

            let body = document.render(&context)?;
            match format {
                Format::Text => email.text = body,
                Format::Html => email.html = self.process_html(name, body)?,
            }
        }

        if !found {
            return Err(RenderError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(email)
    }

    fn process_html(&self, name: &str, html: String) -> Result<String, RenderError> {
        match &self.processor {
            Some(processor) => processor
                .process(&html)
                .map_err(|err| TemplateError::process(name, err).into()),
            None => Ok(html),
        }
    }

    fn layout_or_default<'a>(&'a self, layout: &'a str) -> (&'a str, bool) {
        if layout.is_empty() || layout == self.default_layout {
            (self.default_layout.as_str(), true)
        } else {
            (layout, false)
        }
    }

    /// Drops every cached resolved document.
    pub fn clear_cache(&self) {
        self.state.write().cache.clear();
    }

    /// Keys of the currently cached documents, sorted.
    pub fn cached_documents(&self) -> Vec<CacheKey> {
        let state = self.state.read();
        let mut keys: Vec<CacheKey> = state.cache.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn cache_len(&self) -> usize {
        self.state.read().cache.len()
    }

    /// Source names in registration order.
    pub fn source_names(&self) -> Vec<String> {
        self.snapshot()
            .sources
            .iter()
            .map(|source| source.name().to_string())
            .collect()
    }

    /// Canonical identifiers in the base set of `format`, sorted.
    pub fn identifiers(&self, format: Format) -> Vec<String> {
        self.snapshot()
            .base
            .get(format)
            .identifiers()
            .map(str::to_string)
            .collect()
    }

    pub fn has_identifier(&self, format: Format, identifier: &str) -> bool {
        self.snapshot().base.get(format).contains(identifier)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn default_layout(&self) -> &str {
        &self.default_layout
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state.read().snapshot)
    }
}
