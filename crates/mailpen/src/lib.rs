//! # Mailpen - Templated Email
//!
//! Mailpen composes email from layered templates and hands the result to a
//! delivery [`Provider`]. Template resolution, caching and rendering live in
//! [`mailpen_render`], re-exported here; this crate adds the mail side:
//!
//! - [`Config`]: sender addresses and branding, loadable from YAML
//! - [`TemplateData`]: the data map templates render against, seeded from
//!   the configuration
//! - [`TableData`], [`NotificationBoxData`] and the other component structs:
//!   typed data for the built-in components
//! - [`Message`] / [`MessageBuilder`]: recipients, template selection, bodies
//!   and attachments
//! - [`Provider`]: the delivery seam, with [`MemoryProvider`] and
//!   [`LogProvider`] built in
//! - [`Mailpen`]: renders a message's template and sends it
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use mailpen::{Config, Engine, Mailpen, MemoryProvider, MemorySource, Message, TemplateData};
//!
//! let engine = Engine::builder()
//!     .source(
//!         MemorySource::new("app")
//!             .with_file("emails/reset.txt", "Hi {{ Name }}, reset here: {{ Link }}")
//!             .with_file("emails/reset.html", "<p>Hi {{ Name }}</p>"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let provider = Arc::new(MemoryProvider::new());
//! let config = Config {
//!     from: "support@example.com".into(),
//!     company_name: "Acme".into(),
//!     ..Config::default()
//! };
//! let mailpen = Mailpen::with_engine(provider.clone(), config, engine);
//!
//! let message = Message::builder()
//!     .to(["ana@example.com"])
//!     .template("reset")
//!     .data(
//!         TemplateData::new()
//!             .with("Subject", "Reset your password")
//!             .with("Name", "Ana")
//!             .with("Link", "https://example.com/r/1"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! mailpen.send(message).unwrap();
//!
//! let sent = provider.last().unwrap();
//! assert_eq!(sent.subject, "Reset your password");
//! assert!(sent.text_body.starts_with("Hi Ana, reset here: https://example.com/r/1"));
//! assert!(sent.html_body.contains("<p>Hi Ana</p>"));
//! ```
//!
//! ## Logging
//!
//! Both crates emit `tracing` events and never install a subscriber.

mod components;
mod config;
mod error;
mod mailpen;
mod message;
pub mod provider;
mod template_data;

pub use components::{
    Card, CardGridData, FooterData, LogoData, NotificationBoxData, NotificationButton, QuoteData,
    TableCell, TableData, TableHeader, TableRow, TwoColumnData, TwoColumnRow,
};
pub use config::Config;
pub use error::MailError;
pub use mailpen::Mailpen;
pub use message::{Attachment, ContentType, Message, MessageBuilder};
pub use provider::{Capabilities, LogProvider, MemoryProvider, Provider};
pub use template_data::TemplateData;

// Re-export the rendering layer.
pub use mailpen_render;
pub use mailpen_render::{
    DirSource, EmbeddedSource, Engine, EngineBuilder, Format, FunctionRegistry, HtmlProcessor,
    MemorySource, Phase, RenderError, RenderedEmail, Source, TemplateError, TemplateSource, Theme,
};
