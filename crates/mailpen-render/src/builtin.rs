//! Templates shipped with the engine.
//!
//! The built-in source is registered before any caller source, so every
//! file here can be overridden by a source defining the same path.
//!
//! Components read their data from the including scope. The simple ones take
//! loose variables (`text`, `url`, `style`, `level`, `size`); the structured
//! ones take a single map with `PascalCase` fields:
//!
//! | Component | Variable | Fields |
//! |-----------|----------|--------|
//! | `component:data-table` | `table` | `Headers[].Text/Width`, `Rows[].Cells[].Text/Width` |
//! | `component:two-column` | `columns` | `Rows[].Label/Value` |
//! | `component:card-grid` | `grid` | `Cards[].ImageURL/ImageAlt/Title/Description/LinkURL/LinkText` |
//! | `component:notification-box` | `notification` | `Title`, `Message`, colors, `Icon`, `Button` |
//! | `component:quote` | `quote` | `QuoteText`, `Author`, `Role`, `AuthorImage` |
//! | `component:logo` | `logo`, else `Logo` | `Path`, `Alt`, `URL` |
//! | `component:footer` | `Footer`, else top-level keys | `CompanyName`, `SupportEmail`, `CopyrightText`, `AddressLine1/2` |
//!
//! ```jinja
//! {% with table=Order.Items %}{% include "component:data-table" %}{% endwith %}
//! ```

use crate::source::EmbeddedSource;

/// Name of the built-in source.
pub const BUILTIN_SOURCE_NAME: &str = "built-in";

static ENTRIES: &[(&str, &str)] = &[
    ("layouts/base.html", include_str!("../templates/layouts/base.html")),
    ("layouts/base.txt", include_str!("../templates/layouts/base.txt")),
    ("components/button.html", include_str!("../templates/components/button.html")),
    ("components/button.txt", include_str!("../templates/components/button.txt")),
    ("components/card-grid.html", include_str!("../templates/components/card-grid.html")),
    ("components/card-grid.txt", include_str!("../templates/components/card-grid.txt")),
    ("components/data-table.html", include_str!("../templates/components/data-table.html")),
    ("components/data-table.txt", include_str!("../templates/components/data-table.txt")),
    ("components/divider.html", include_str!("../templates/components/divider.html")),
    ("components/divider.txt", include_str!("../templates/components/divider.txt")),
    ("components/footer.html", include_str!("../templates/components/footer.html")),
    ("components/footer.txt", include_str!("../templates/components/footer.txt")),
    ("components/header.html", include_str!("../templates/components/header.html")),
    ("components/header.txt", include_str!("../templates/components/header.txt")),
    ("components/logo.html", include_str!("../templates/components/logo.html")),
    ("components/logo.txt", include_str!("../templates/components/logo.txt")),
    ("components/notification-box.html", include_str!("../templates/components/notification-box.html")),
    ("components/notification-box.txt", include_str!("../templates/components/notification-box.txt")),
    ("components/paragraph.html", include_str!("../templates/components/paragraph.html")),
    ("components/paragraph.txt", include_str!("../templates/components/paragraph.txt")),
    ("components/quote.html", include_str!("../templates/components/quote.html")),
    ("components/quote.txt", include_str!("../templates/components/quote.txt")),
    ("components/spacer.html", include_str!("../templates/components/spacer.html")),
    ("components/spacer.txt", include_str!("../templates/components/spacer.txt")),
    ("components/two-column.html", include_str!("../templates/components/two-column.html")),
    ("components/two-column.txt", include_str!("../templates/components/two-column.txt")),
];

/// The built-in layouts and components.
pub fn builtin_source() -> EmbeddedSource {
    EmbeddedSource::new(BUILTIN_SOURCE_NAME, ENTRIES)
}
