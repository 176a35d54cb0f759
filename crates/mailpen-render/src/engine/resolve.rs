//! Document resolution.
//!
//! Resolving a document clones the base set of the requested format, so the
//! shared base set is never mutated, and parses the document body into the
//! clone under its bare name. Sources are searched newest first; the first
//! one holding `emails/<name>.<ext>` wins.
//!
//! The clone also receives the entry template, `layout`, which binds the
//! document to its layout:
//!
//! ```jinja
//! {% extends "layout:base" %}{% block content %}{% include "welcome" %}{% endblock %}
//! ```
//!
//! Layouts expose a `content` block for the document body. When the default
//! layout is not defined by any source the entry is just the include, so a
//! document can render without a layout. An explicitly requested layout is
//! always extended; if it does not exist, rendering fails.

use minijinja::{Environment, Value};
use tracing::debug;

use super::base::BaseSet;
use super::Snapshot;
use crate::error::{RenderError, TemplateError};
use crate::format::Format;
use crate::naming::{document_path, is_valid_path, layout_identifier};

/// Name of the entry template every resolved document is rendered through.
pub const ENTRY_POINT: &str = "layout";

/// A base set clone with one document parsed in, ready to render.
pub struct ResolvedDocument {
    env: Environment<'static>,
    name: String,
    layout: String,
    format: Format,
    source: String,
}

impl ResolvedDocument {
    /// The document's bare name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the layout this document was bound to.
    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Name of the source the document body came from.
    pub fn source_name(&self) -> &str {
        &self.source
    }

    /// Renders the entry template against `context`.
    ///
    /// Rendering only reads the environment, so a shared resolved document
    /// can be rendered from many threads at once.
    pub fn render(&self, context: &Value) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(ENTRY_POINT)
            .map_err(|err| TemplateError::execute(&self.name, err))?;

        template
            .render(context)
            .map_err(|err| TemplateError::execute(&self.name, err).into())
    }
}

/// Resolves `name` for one format against a snapshot.
///
/// Returns `Ok(None)` when no source defines the document in this format,
/// and for names that are not clean relative paths (`..`, `./x`, `a//b`).
pub(crate) fn resolve_document(
    snapshot: &Snapshot,
    name: &str,
    layout: &str,
    format: Format,
    layout_is_default: bool,
) -> Result<Option<ResolvedDocument>, RenderError> {
    if !is_valid_path(name) {
        debug!(document = name, %format, "rejected document name");
        return Ok(None);
    }

    let path = document_path(name, format);
    let Some(source) = snapshot
        .sources
        .iter()
        .rev()
        .find(|source| source.exists(&path))
    else {
        return Ok(None);
    };

    if name == ENTRY_POINT {
        return Err(TemplateError::parse(
            name,
            format!("document name {:?} is reserved for the entry template", ENTRY_POINT),
        )
        .into());
    }

    let content = source.read(&path)?;
    let base = snapshot.base.get(format);
    let layout_id = layout_identifier(layout);

    let mut env = base.env().clone();
    env.add_template_owned(name.to_string(), content)
        .map_err(|err| TemplateError::parse(name, format!("{} ({} in source {:?})", err, path, source.name())))?;
    env.add_template_owned(ENTRY_POINT, entry_source(base, name, &layout_id, layout_is_default))
        .map_err(|err| TemplateError::parse(name, err))?;

    debug!(
        document = name,
        %format,
        layout = layout_id.as_str(),
        source = source.name(),
        "resolved document"
    );

    Ok(Some(ResolvedDocument {
        env,
        name: name.to_string(),
        layout: layout_id,
        format,
        source: source.name().to_string(),
    }))
}

fn entry_source(base: &BaseSet, name: &str, layout_id: &str, layout_is_default: bool) -> String {
    if base.contains(layout_id) || !layout_is_default {
        format!(
            "{{% extends {} %}}{{% block content %}}{{% include {} %}}{{% endblock %}}",
            literal(layout_id),
            literal(name)
        )
    } else {
        format!("{{% include {} %}}", literal(name))
    }
}

/// Quotes `value` as a template string literal.
fn literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
