//! Output formats and their file-extension convention.

use std::fmt;

use minijinja::AutoEscape;

/// A rendered body format.
///
/// The format decides both which template files belong to it (by extension)
/// and how values are escaped when interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Format {
    /// Plain text, `.txt` files, no escaping.
    Text,
    /// HTML, `.html` files, HTML auto-escaping.
    Html,
}

impl Format {
    /// Every format, in rendering order.
    pub const ALL: [Format; 2] = [Format::Text, Format::Html];

    /// File extension (with leading dot) for templates of this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Text => ".txt",
            Format::Html => ".html",
        }
    }

    /// Determines the format of a template file from its path.
    ///
    /// Returns `None` for files that are not templates.
    pub fn from_path(path: &str) -> Option<Format> {
        Self::ALL
            .into_iter()
            .find(|format| path.ends_with(format.extension()))
    }

    pub(crate) fn auto_escape(self) -> AutoEscape {
        match self {
            Format::Text => AutoEscape::None,
            Format::Html => AutoEscape::Html,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Html => "html",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
