//! Typed data for the built-in components.
//!
//! Each struct serializes with the `PascalCase` field names the component
//! templates read, and converts into a template value, so it can be dropped
//! straight into [`TemplateData`](crate::TemplateData):
//!
//! ```rust
//! use mailpen::{TableCell, TableData, TableHeader, TableRow, TemplateData};
//!
//! let table = TableData {
//!     headers: vec![TableHeader::new("Item", "70%"), TableHeader::new("Price", "30%")],
//!     rows: vec![TableRow::new([TableCell::new("Widget", "70%"), TableCell::new("$5", "30%")])],
//! };
//! let data = TemplateData::new().with("table", table);
//! assert_eq!(data.get("table").unwrap()["Headers"][0]["Text"], "Item");
//! ```
//!
//! The including template names the variable:
//! `{% with table=table %}{% include "component:data-table" %}{% endwith %}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableHeader {
    pub text: String,
    /// CSS width, e.g. `30%`. Empty leaves the column unsized.
    pub width: String,
}

impl TableHeader {
    pub fn new(text: impl Into<String>, width: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            width: width.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableCell {
    pub text: String,
    pub width: String,
}

impl TableCell {
    pub fn new(text: impl Into<String>, width: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            width: width.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: impl IntoIterator<Item = TableCell>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }
}

/// Data for `component:data-table`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableData {
    pub headers: Vec<TableHeader>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TwoColumnRow {
    pub label: String,
    pub value: String,
}

impl TwoColumnRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Data for `component:two-column`: label and value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TwoColumnData {
    pub rows: Vec<TwoColumnRow>,
}

impl FromIterator<TwoColumnRow> for TwoColumnData {
    fn from_iter<I: IntoIterator<Item = TwoColumnRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Data for `component:logo`. Seeded as `Logo` from the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogoData {
    /// Image source. An empty path renders no logo.
    pub path: String,
    pub alt: String,
    /// Link wrapped around the image, if any.
    #[serde(rename = "URL")]
    pub url: String,
}

/// Data for `component:footer`. Seeded as `Footer` from the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FooterData {
    pub company_name: String,
    pub support_email: String,
    pub copyright_text: String,
    pub address_line1: String,
    pub address_line2: String,
}

/// Call to action inside a notification box. Empty colors use the box accent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationButton {
    pub bg_color: String,
    pub border_color: String,
    pub text_color: String,
    pub text: String,
    #[serde(rename = "URL")]
    pub url: String,
}

/// Data for `component:notification-box`.
///
/// Empty colors fall back to the theme: the accent to `colors.warning`, the
/// title to the accent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationBoxData {
    pub bg_color: String,
    pub border_color: String,
    pub icon: String,
    pub icon_alt: String,
    pub title: String,
    pub title_color: String,
    pub message: String,
    pub text_color: String,
    pub button: Option<NotificationButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Card {
    #[serde(rename = "ImageURL")]
    pub image_url: String,
    pub image_alt: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "LinkURL")]
    pub link_url: String,
    pub link_text: String,
}

/// Data for `component:card-grid`, laid out two cards per row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardGridData {
    pub cards: Vec<Card>,
}

/// Data for `component:quote`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuoteData {
    pub quote_text: String,
    pub author: String,
    pub role: String,
    pub author_image: String,
}

macro_rules! impl_into_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(data: $ty) -> Self {
                    // String-only structs always serialize.
                    serde_json::to_value(data).unwrap_or(Value::Null)
                }
            }
        )*
    };
}

impl_into_value!(
    TableData,
    TwoColumnData,
    LogoData,
    FooterData,
    NotificationBoxData,
    CardGridData,
    QuoteData,
);
