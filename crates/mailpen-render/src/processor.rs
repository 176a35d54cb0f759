//! HTML post-processing.
//!
//! After an HTML body is rendered it may be handed to one [`HtmlProcessor`]
//! (CSS inlining, minification, link rewriting). Text bodies are never
//! processed. Any closure `Fn(&str) -> Result<String, BoxError>` is a
//! processor, and [`CompositeProcessor`] chains several.

/// Boxed error returned by processors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Transforms rendered HTML.
pub trait HtmlProcessor: Send + Sync {
    fn process(&self, html: &str) -> Result<String, BoxError>;
}

impl<F> HtmlProcessor for F
where
    F: Fn(&str) -> Result<String, BoxError> + Send + Sync,
{
    fn process(&self, html: &str) -> Result<String, BoxError> {
        self(html)
    }
}

/// Returns the HTML unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughProcessor;

impl HtmlProcessor for PassthroughProcessor {
    fn process(&self, html: &str) -> Result<String, BoxError> {
        Ok(html.to_string())
    }
}

/// Applies processors in the order they were added.
///
/// The first failure aborts the chain.
#[derive(Default)]
pub struct CompositeProcessor {
    processors: Vec<Box<dyn HtmlProcessor>>,
}

impl CompositeProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, processor: impl HtmlProcessor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

impl HtmlProcessor for CompositeProcessor {
    fn process(&self, html: &str) -> Result<String, BoxError> {
        let mut current = html.to_string();
        for processor in &self.processors {
            current = processor.process(&current)?;
        }
        Ok(current)
    }
}
