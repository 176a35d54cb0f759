//! Per-format base template sets.
//!
//! A base set holds every layout, component and partial of one format, merged
//! across all sources in registration order. Sources are walked oldest first
//! and, inside a source, layouts then components then partials; a later
//! definition of an identifier replaces the earlier one.
//!
//! Base sets are always built from scratch into fresh environments. The
//! engine installs the result only when the whole build succeeds.

use std::collections::BTreeSet;
use std::sync::Arc;

use minijinja::Environment;
use tracing::{debug, trace};

use crate::error::{RenderError, TemplateError};
use crate::format::Format;
use crate::functions::FunctionRegistry;
use crate::naming::{identifier_for, Role};
use crate::source::TemplateSource;
use crate::theme::Theme;

/// One format's merged templates.
#[derive(Clone)]
pub(crate) struct BaseSet {
    env: Environment<'static>,
    identifiers: BTreeSet<String>,
}

impl BaseSet {
    fn new(format: Format, functions: &FunctionRegistry, theme: &Arc<Theme>) -> Self {
        let mut env = Environment::new();
        let escape = format.auto_escape();
        env.set_auto_escape_callback(move |_| escape.clone());
        functions.bind(&mut env);
        env.add_global("theme", Theme::accessor(Arc::clone(theme)));

        Self {
            env,
            identifiers: BTreeSet::new(),
        }
    }

    fn add(&mut self, identifier: String, source: String) -> Result<(), minijinja::Error> {
        self.env.add_template_owned(identifier.clone(), source)?;
        self.identifiers.insert(identifier);
        Ok(())
    }

    pub(crate) fn env(&self) -> &Environment<'static> {
        &self.env
    }

    pub(crate) fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    pub(crate) fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(String::as_str)
    }
}

/// The text and HTML base sets, always built together.
#[derive(Clone)]
pub(crate) struct BaseSets {
    text: BaseSet,
    html: BaseSet,
}

impl BaseSets {
    /// Builds both base sets from `sources`.
    ///
    /// Fails on the first unreadable or unparsable file; nothing partial is
    /// returned.
    pub(crate) fn build(
        sources: &[TemplateSource],
        functions: &FunctionRegistry,
        theme: &Arc<Theme>,
    ) -> Result<Self, RenderError> {
        let mut sets = Self {
            text: BaseSet::new(Format::Text, functions, theme),
            html: BaseSet::new(Format::Html, functions, theme),
        };

        for source in sources {
            for role in Role::BASE {
                for path in source.walk(role.dir())? {
                    let Some(format) = Format::from_path(&path) else {
                        continue;
                    };

                    let content = source.read(&path)?;
                    let identifier = identifier_for(role, &path);
                    trace!(
                        source = source.name(),
                        %format,
                        identifier = identifier.as_str(),
                        "parsing base template"
                    );

                    sets.get_mut(format)
                        .add(identifier.clone(), content)
                        .map_err(|err| {
                            TemplateError::parse(
                                identifier,
                                format!("{} ({} in source {:?})", err, path, source.name()),
                            )
                        })?;
                }
            }
        }

        debug!(
            sources = sources.len(),
            text = sets.text.identifiers.len(),
            html = sets.html.identifiers.len(),
            "built base template sets"
        );
        Ok(sets)
    }

    pub(crate) fn get(&self, format: Format) -> &BaseSet {
        match format {
            Format::Text => &self.text,
            Format::Html => &self.html,
        }
    }

    fn get_mut(&mut self, format: Format) -> &mut BaseSet {
        match format {
            Format::Text => &mut self.text,
            Format::Html => &mut self.html,
        }
    }
}
