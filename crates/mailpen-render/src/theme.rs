//! Theme values addressable from templates.
//!
//! A [`Theme`] is an immutable tree of nested maps whose leaves are scalar
//! values (colours, font stacks, spacing). Templates read it through the
//! `theme` function with a dotted path:
//!
//! ```jinja
//! <td style="color: {{ theme('colors.text.primary') }}">
//! ```
//!
//! # Missing Paths
//!
//! [`Theme::lookup`] returns `None` for an absent path, and the template
//! function renders that as an empty string. A partial theme therefore
//! degrades silently. Use [`Theme::require`] or [`Theme::validate`] to check a
//! tree up front when silent degradation is not acceptable.
//!
//! # Construction
//!
//! ```rust
//! use mailpen_render::Theme;
//!
//! let theme = Theme::from_yaml(r##"
//! colors:
//!   primary: "#4DA647"
//!   text:
//!     primary: "#333333"
//! "##).unwrap();
//!
//! assert_eq!(theme.lookup("colors.text.primary").unwrap(), "#333333");
//! assert!(theme.lookup("colors.text.muted").is_none());
//! ```

use std::path::Path;
use std::sync::Arc;

use minijinja::Value;
use serde_json::{json, Map, Value as JsonValue};

/// Errors from theme construction and strict lookups.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("theme root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("failed to parse theme: {0}")]
    Parse(String),

    #[error("failed to read theme {path}: {message}")]
    Load { path: String, message: String },

    #[error("theme has no value at {path:?}")]
    Missing { path: String },
}

/// An immutable nested theme tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    tree: Map<String, JsonValue>,
}

impl Theme {
    /// Creates an empty theme. Every lookup on it returns `None`.
    pub fn empty() -> Self {
        Self { tree: Map::new() }
    }

    /// Builds a theme from a JSON value, which must be an object.
    pub fn from_value(value: JsonValue) -> Result<Self, ThemeError> {
        match value {
            JsonValue::Object(tree) => Ok(Self { tree }),
            other => Err(ThemeError::NotAMapping {
                found: kind_name(&other),
            }),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ThemeError> {
        let value: JsonValue =
            serde_json::from_str(content).map_err(|e| ThemeError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ThemeError> {
        let value: JsonValue =
            serde_yaml::from_str(content).map_err(|e| ThemeError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Loads a YAML (or JSON, by `.json` extension) theme file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ThemeError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Looks up a dotted path.
    ///
    /// Returns `None` when the path is empty, when any segment is absent, or
    /// when an intermediate segment is not itself a mapping.
    pub fn lookup(&self, path: &str) -> Option<&JsonValue> {
        if path.is_empty() {
            return None;
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.tree.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Strict lookup: like [`lookup`](Self::lookup) but absent paths are errors.
    pub fn require(&self, path: &str) -> Result<&JsonValue, ThemeError> {
        self.lookup(path).ok_or_else(|| ThemeError::Missing {
            path: path.to_string(),
        })
    }

    /// Returns every path from `paths` that has no value in this theme.
    pub fn validate<'a, I>(&self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths
            .into_iter()
            .filter(|path| self.lookup(path).is_none())
            .map(str::to_string)
            .collect()
    }

    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.tree
    }

    /// Builds the `theme(path)` template function over a shared theme.
    pub(crate) fn accessor(theme: Arc<Theme>) -> Value {
        Value::from_function(move |path: &str| -> Value {
            theme
                .lookup(path)
                .map(Value::from_serialize)
                .unwrap_or(Value::UNDEFINED)
        })
    }
}

impl Default for Theme {
    /// The palette the built-in templates are designed around.
    fn default() -> Self {
        let mut tree = Map::new();
        tree.insert(
            "colors".into(),
            json!({
                "primary": "#4DA647",
                "secondary": "#30C3E6",
                "success": "#4caf50",
                "danger": "#f44336",
                "warning": "#ffa500",
                "text": {
                    "primary": "#333333",
                    "secondary": "#666666",
                    "muted": "#999999"
                },
                "background": {
                    "primary": "#ffffff",
                    "secondary": "#f8f8f8"
                },
                "border": "#dddddd"
            }),
        );
        tree.insert(
            "typography".into(),
            json!({
                "font": {
                    "family": "Arial, sans-serif",
                    "size": {
                        "xs": "12px",
                        "sm": "14px",
                        "base": "16px",
                        "lg": "18px",
                        "xl": "24px"
                    },
                    "lineHeight": {
                        "tight": "18px",
                        "normal": "21px",
                        "relaxed": "24px",
                        "loose": "30px"
                    },
                    "weight": {
                        "normal": "400",
                        "medium": "500",
                        "bold": "700"
                    },
                    "letterSpacing": ".25px"
                }
            }),
        );
        tree.insert(
            "spacing".into(),
            json!({
                "0": "0",
                "1": "5px",
                "2": "10px",
                "3": "15px",
                "4": "20px",
                "5": "30px",
                "6": "40px"
            }),
        );
        tree.insert(
            "borders".into(),
            json!({
                "width": "1px",
                "style": "solid",
                "radius": {
                    "sm": "3px",
                    "md": "4px",
                    "lg": "8px"
                }
            }),
        );
        tree.insert(
            "components".into(),
            json!({
                "button": {
                    "padding": { "x": "24px", "y": "12px" },
                    "textTransform": "uppercase"
                },
                "card": { "padding": "20px", "shadow": "none" },
                "table": { "cell": { "padding": "12px 15px" } },
                "notification": { "padding": "15px", "borderWidth": "4px" },
                "logo": { "maxWidth": "200px", "padding": "30px" }
            }),
        );
        tree.insert(
            "layout".into(),
            json!({
                "maxWidth": "600px",
                "gutter": "20px"
            }),
        );
        Self { tree }
    }
}

fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "sequence",
        JsonValue::Object(_) => "mapping",
    }
}
