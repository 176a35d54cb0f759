//! Canonical identifiers for template files.
//!
//! A file's directory decides its role, and its role decides the identifier
//! it is registered under:
//!
//! | File | Identifier |
//! |------|------------|
//! | `layouts/base.html` | `layout:base` |
//! | `components/cards/item.txt` | `component:cards/item` |
//! | `partials/signature.html` | `partial:signature` |
//! | `emails/account/welcome.html` | `account/welcome` |
//!
//! Layouts, components and partials are merged into the per-format base set,
//! so they are namespaced. Documents are resolved on demand and keep their
//! bare path.

use std::fmt;

use crate::format::Format;

pub const LAYOUTS_DIR: &str = "layouts";
pub const COMPONENTS_DIR: &str = "components";
pub const PARTIALS_DIR: &str = "partials";
pub const EMAILS_DIR: &str = "emails";

/// The role a template plays, derived from its top-level directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Layout,
    Component,
    Partial,
    Document,
}

impl Role {
    /// Roles merged into the base set, in load order.
    pub const BASE: [Role; 3] = [Role::Layout, Role::Component, Role::Partial];

    /// Top-level directory holding templates of this role.
    pub fn dir(self) -> &'static str {
        match self {
            Role::Layout => LAYOUTS_DIR,
            Role::Component => COMPONENTS_DIR,
            Role::Partial => PARTIALS_DIR,
            Role::Document => EMAILS_DIR,
        }
    }

    /// Identifier namespace, `None` for documents.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Role::Layout => Some("layout"),
            Role::Component => Some("component"),
            Role::Partial => Some("partial"),
            Role::Document => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix().unwrap_or("document"))
    }
}

/// Maps a source-relative path to its canonical identifier.
///
/// The role directory and the file extension are stripped, then the role
/// namespace is prepended.
pub fn identifier_for(role: Role, path: &str) -> String {
    let name = path.strip_prefix(role.dir()).unwrap_or(path);
    let name = name.trim_start_matches('/');
    let name = strip_extension(name);

    match role.prefix() {
        Some(prefix) => format!("{}:{}", prefix, name),
        None => name.to_string(),
    }
}

/// Identifier of the layout named `name`.
pub fn layout_identifier(name: &str) -> String {
    format!("{}:{}", Role::Layout.prefix().unwrap_or("layout"), name)
}

/// Source-relative path of a document file in the given format.
pub fn document_path(name: &str, format: Format) -> String {
    format!("{}/{}{}", EMAILS_DIR, name, format.extension())
}

/// Whether `path` is a clean relative path: `/`-separated segments, none of
/// them empty, `.` or `..`, and no backslashes.
///
/// Document names and source paths must pass this before they reach a
/// source, so a name can never address a file outside the source root.
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && !segment.contains(['\\', '\0'])
        })
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if !name[dot..].contains('/') => &name[..dot],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_for_base_roles() {
        assert_eq!(
            identifier_for(Role::Layout, "layouts/base.html"),
            "layout:base"
        );
        assert_eq!(
            identifier_for(Role::Component, "components/cards/item.txt"),
            "component:cards/item"
        );
        assert_eq!(
            identifier_for(Role::Partial, "partials/signature.html"),
            "partial:signature"
        );
    }

    #[test]
    fn test_identifier_for_document_has_no_prefix() {
        assert_eq!(
            identifier_for(Role::Document, "emails/account/welcome.html"),
            "account/welcome"
        );
    }

    #[test]
    fn test_identifier_keeps_inner_dots() {
        assert_eq!(
            identifier_for(Role::Component, "components/v1.2/button.html"),
            "component:v1.2/button"
        );
    }

    #[test]
    fn test_layout_identifier_and_document_path() {
        assert_eq!(layout_identifier("marketing"), "layout:marketing");
        assert_eq!(
            document_path("welcome", Format::Html),
            "emails/welcome.html"
        );
        assert_eq!(document_path("welcome", Format::Text), "emails/welcome.txt");
    }

    #[test]
    fn test_is_valid_path_accepts_nested_names() {
        assert!(is_valid_path("welcome"));
        assert!(is_valid_path("account/welcome"));
        assert!(is_valid_path("emails/v1.2/receipt.html"));
    }

    #[test]
    fn test_is_valid_path_rejects_escapes() {
        for bad in [
            "",
            "..",
            "../secret",
            "../../secret",
            "account/../../secret",
            "./welcome",
            "account/./welcome",
            "/welcome",
            "welcome/",
            "account//welcome",
            "..\\secret",
        ] {
            assert!(!is_valid_path(bad), "{:?} should be rejected", bad);
        }
    }
}
