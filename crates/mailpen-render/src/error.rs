//! Error types for template resolution and rendering.
//!
//! [`RenderError`] is the single error type returned by the engine. Template
//! failures carry a [`TemplateError`] that records the offending identifier
//! and the [`Phase`] in which the failure happened, so a caller can diagnose
//! a broken template without re-parsing its source.

use std::fmt;

use crate::format::Format;
use crate::source::SourceError;

/// The stage of the pipeline in which a template failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Template source text could not be compiled.
    Parse,
    /// A resolved template failed while rendering against data.
    Execute,
    /// The HTML post-processor rejected the rendered output.
    Process,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Parse => "parse",
            Phase::Execute => "execute",
            Phase::Process => "process",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A template failure with enough context to locate it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("template error{} during {phase} phase: {message}", location(.identifier))]
pub struct TemplateError {
    /// Canonical identifier (or document name) of the failing template.
    pub identifier: Option<String>,
    /// Pipeline stage that failed.
    pub phase: Phase,
    /// Underlying failure message.
    pub message: String,
}

impl TemplateError {
    pub fn new(identifier: Option<String>, phase: Phase, message: impl Into<String>) -> Self {
        Self {
            identifier,
            phase,
            message: message.into(),
        }
    }

    pub fn parse(identifier: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::new(Some(identifier.into()), Phase::Parse, err.to_string())
    }

    pub fn execute(identifier: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::new(Some(identifier.into()), Phase::Execute, err.to_string())
    }

    pub fn process(identifier: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::new(Some(identifier.into()), Phase::Process, err.to_string())
    }
}

fn location(identifier: &Option<String>) -> String {
    identifier
        .as_deref()
        .map(|id| format!(" in {}", id))
        .unwrap_or_default()
}

/// Error type for all engine operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The document exists in none of the registered sources, in any format.
    #[error("no template found for document {name:?}")]
    NotFound { name: String },

    /// The document is absent for one format. Non-fatal during rendering.
    #[error("template {path} not found for {format} format")]
    FormatNotFound { path: String, format: Format },

    /// Parse, execute or process failure.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A source could not be walked or read.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Render data could not be serialized into a template value.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RenderError {
    /// Returns the template failure phase, if this is a template error.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            RenderError::Template(err) => Some(err.phase),
            _ => None,
        }
    }

    /// True for both whole-document and per-format absence.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RenderError::NotFound { .. } | RenderError::FormatNotFound { .. }
        )
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}
