//! # Mailpen Render - Layered Email Template Engine
//!
//! `mailpen-render` resolves email documents against an ordered stack of
//! template sources and renders them to text and HTML bodies.
//!
//! This crate is the rendering foundation for the `mailpen` mail library, but
//! can be used on its own by anything that needs layered, overridable
//! templates.
//!
//! ## Core Concepts
//!
//! - [`Source`]: A read-only tree of template files ([`DirSource`],
//!   [`MemorySource`], [`EmbeddedSource`])
//! - [`Engine`]: Owns the source stack, builds per-format base sets and caches
//!   resolved documents
//! - [`Format`]: Text or HTML; HTML output is auto-escaped, text is not
//! - [`Theme`]: Nested style values available to templates via `theme('a.b')`
//! - [`FunctionRegistry`]: Per-engine template functions
//! - [`HtmlProcessor`]: Post-processing applied to every rendered HTML body
//!
//! ## Source Layout
//!
//! Every source follows the same directory convention:
//!
//! ```text
//! layouts/base.html        -> layout:base
//! components/button.html   -> component:button
//! partials/header.txt      -> partial:header
//! emails/welcome.html      -> document "welcome"
//! ```
//!
//! Layouts, components and partials form the base set of each format.
//! Documents are resolved on demand. Sources added later override earlier
//! ones, per identifier and per document.
//!
//! ## Quick Start
//!
//! ```rust
//! use mailpen_render::{Engine, MemorySource};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! #[allow(non_snake_case)]
//! struct Welcome {
//!     Subject: String,
//!     Name: String,
//! }
//!
//! let engine = Engine::builder()
//!     .include_builtin(false)
//!     .source(
//!         MemorySource::new("app")
//!             .with_file("layouts/base.txt", "== {% block content %}{% endblock %} ==")
//!             .with_file("emails/welcome.txt", "Hello {{ Name }}"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let email = engine
//!     .render("welcome", &Welcome { Subject: "Hi".into(), Name: "Ana".into() }, "")
//!     .unwrap();
//!
//! assert_eq!(email.subject.as_deref(), Some("Hi"));
//! assert_eq!(email.text, "== Hello Ana ==");
//! assert_eq!(email.html, "");
//! ```
//!
//! ## Layouts
//!
//! A layout wraps a document through its `content` block. The layout is
//! chosen per render; an empty name selects the default (`base`). When no
//! source defines the default layout the document renders bare. A layout
//! that was asked for by name must exist.
//!
//! ## Errors
//!
//! Every operation returns [`RenderError`]. Template failures carry a
//! [`TemplateError`] naming the template and the [`Phase`] (parse, execute or
//! process) that failed.

mod builtin;
pub mod engine;
mod error;
mod format;
pub mod functions;
pub mod naming;
pub mod processor;
pub mod source;
pub mod theme;

pub use builtin::{builtin_source, BUILTIN_SOURCE_NAME};
pub use engine::{
    CacheKey, Engine, EngineBuilder, RenderedEmail, ResolvedDocument, DEFAULT_LAYOUT, ENTRY_POINT,
};
pub use error::{Phase, RenderError, TemplateError};
pub use format::Format;
pub use functions::FunctionRegistry;
pub use processor::{BoxError, CompositeProcessor, HtmlProcessor, PassthroughProcessor};
pub use source::{DirSource, EmbeddedSource, MemorySource, Source, SourceError, TemplateSource};
pub use theme::{Theme, ThemeError};

// Re-export minijinja for callers registering functions with its types.
pub use minijinja;
