//! The [`Mailpen`] facade: render a message's template and hand it to a
//! provider.

use mailpen_render::{Engine, RenderedEmail};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::MailError;
use crate::message::Message;
use crate::provider::Provider;
use crate::template_data::TemplateData;

/// Renders and sends templated email.
///
/// ```rust
/// use std::sync::Arc;
/// use mailpen::{Config, Mailpen, MemoryProvider, Message};
/// use mailpen_render::{Engine, MemorySource};
///
/// let engine = Engine::builder()
///     .source(MemorySource::new("app").with_file(
///         "emails/welcome.txt",
///         "Welcome, {{ Name }}!",
///     ))
///     .build()
///     .unwrap();
/// let provider = Arc::new(MemoryProvider::new());
/// let config = Config { from: "hello@example.com".into(), ..Config::default() };
/// let mailpen = Mailpen::with_engine(provider.clone(), config, engine);
///
/// let message = Message::builder()
///     .to(["ana@example.com"])
///     .subject("Welcome")
///     .template("welcome")
///     .data([("Name", "Ana")].into_iter().collect())
///     .build()
///     .unwrap();
/// mailpen.send(message).unwrap();
///
/// let sent = provider.last().unwrap();
/// assert_eq!(sent.from, "hello@example.com");
/// assert!(sent.text_body.starts_with("Welcome, Ana!"));
/// ```
pub struct Mailpen {
    config: Config,
    provider: Box<dyn Provider>,
    engine: Engine,
}

impl Mailpen {
    /// Creates a mailpen with an engine holding only the built-in templates.
    ///
    /// Add sources later with [`engine`](Self::engine)`().add_source(..)`.
    pub fn new(provider: impl Provider + 'static, config: Config) -> Result<Self, MailError> {
        Ok(Self::with_engine(provider, config, Engine::new()?))
    }

    pub fn with_engine(provider: impl Provider + 'static, config: Config, engine: Engine) -> Self {
        Self {
            config,
            provider: Box::new(provider),
            engine,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Default template data for this configuration, as of now.
    pub fn template_data(&self) -> TemplateData {
        TemplateData::for_config(&self.config)
    }

    /// Renders the message template, if any, into the message.
    ///
    /// The template sees the configuration defaults overlaid with the
    /// message's own data, plus the whole configuration as `Config`. A
    /// rendered `Subject` and any non-empty body replace the message's.
    pub fn prepare(&self, message: &mut Message) -> Result<(), MailError> {
        if message.template.is_empty() {
            return Ok(());
        }

        let mut data = self.template_data().merge(&message.data);
        data.insert("Config", serde_json::to_value(&self.config)?);

        debug!(
            template = message.template.as_str(),
            layout = message.layout.as_str(),
            "rendering email"
        );
        let RenderedEmail { subject, text, html } =
            self.engine.render(&message.template, &data, &message.layout)?;

        if let Some(subject) = subject.filter(|s| !s.is_empty()) {
            message.subject = subject;
        }
        if !text.is_empty() {
            message.text_body = text;
        }
        if !html.is_empty() {
            message.html_body = html;
        }
        Ok(())
    }

    /// Renders, completes, validates and delivers a message.
    ///
    /// An empty `from` is filled from the configuration. Validation runs the
    /// provider's checks first, then requires a body and a subject.
    pub fn send(&self, mut message: Message) -> Result<(), MailError> {
        self.prepare(&mut message)?;

        if message.from.is_empty() {
            message.from = self.config.from.clone();
        }
        if message.reply_to.is_empty() {
            message.reply_to = self.config.reply_to.clone();
        }

        self.provider.validate(&message)?;
        message.validate()?;

        self.provider.send(&message).map_err(|err| {
            warn!(provider = self.provider.name(), error = %err, "email delivery failed");
            err
        })?;

        debug!(
            provider = self.provider.name(),
            recipients = message.recipient_count(),
            "email sent"
        );
        Ok(())
    }
}

impl std::fmt::Debug for Mailpen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailpen")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
