//! Data passed to email templates.
//!
//! [`TemplateData`] is a string-keyed map of JSON values. Keys follow the
//! `PascalCase` convention templates use (`{{ CompanyName }}`).
//!
//! # Defaults
//!
//! [`TemplateData::from_config`] seeds every message with the branding fields
//! of a [`Config`] plus the date keys:
//!
//! | Key | Example |
//! |-----|---------|
//! | `CurrentYear` | `2024` |
//! | `CurrentDate` | `March 5, 2024` |
//! | `CurrentTimestamp` | `2024-03-05 14:07:09` |
//! | `Copyright` | `© 2024 Acme. All rights reserved` |
//! | `Logo` | [`LogoData`] for `component:logo` |
//! | `Footer` | [`FooterData`] for `component:footer` |
//!
//! # Merging
//!
//! [`TemplateData::merge`] overlays keys wholesale. [`TemplateData::merge_keys`]
//! combines nested maps one level deep, so a message can add one site link
//! without dropping the configured ones.

use chrono::{DateTime, Datelike, Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::components::{FooterData, LogoData};
use crate::config::Config;
use crate::error::MailError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateData(Map<String, Value>);

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default data for `config` as of now, in local time.
    pub fn for_config(config: &Config) -> Self {
        Self::from_config(config, &Local::now())
    }

    /// Default data for `config` as of `now`.
    pub fn from_config<Tz>(config: &Config, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut data = Self::new();
        data.insert("BaseURL", config.base_url.as_str());
        data.insert(
            "Copyright",
            format!("© {} {}. All rights reserved", now.year(), config.company_name),
        );
        data.insert("CompanyName", config.company_name.as_str());
        data.insert("CompanyAddress1", config.company_address1.as_str());
        data.insert("CompanyAddress2", config.company_address2.as_str());
        data.insert("LogoURL", config.logo_url.as_str());
        data.insert("SupportEmail", config.support_email.as_str());
        data.insert("SupportPhone", config.support_phone.as_str());
        data.insert("WebsiteName", config.website_name.as_str());
        data.insert("WebsiteURL", config.website_url.as_str());
        data.insert("CurrentYear", now.year());
        data.insert(
            "CurrentTimestamp",
            now.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        data.insert("CurrentDate", now.format("%B %-d, %Y").to_string());
        data.insert("SiteLinks", string_map(&config.site_links));
        data.insert("SocialMediaLinks", string_map(&config.social_media_links));
        data.insert(
            "Logo",
            LogoData {
                path: config.logo_url.clone(),
                alt: config.company_name.clone(),
                url: config.website_url.clone(),
            },
        );
        data.insert(
            "Footer",
            FooterData {
                company_name: config.company_name.clone(),
                support_email: config.support_email.clone(),
                copyright_text: format!(
                    "© {} {}. All rights reserved.",
                    now.year(),
                    config.company_name
                ),
                address_line1: config.company_address1.clone(),
                address_line2: config.company_address2.clone(),
            },
        );
        data
    }

    /// Converts any serializable map-like value.
    ///
    /// # Errors
    ///
    /// Fails if `value` does not serialize to a map.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, MailError> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(MailError::Data(format!(
                "expected a map, got {}",
                kind(&other)
            ))),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Returns a copy with every key of `overlay` replacing ours.
    pub fn merge(&self, overlay: &TemplateData) -> TemplateData {
        let mut merged = self.clone();
        for (key, value) in &overlay.0 {
            merged.0.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Like [`merge`](Self::merge), but when both sides hold a map under the
    /// same key the two maps are combined, `overlay` winning per entry.
    pub fn merge_keys(&self, overlay: &TemplateData) -> TemplateData {
        let mut merged = self.clone();
        for (key, value) in &overlay.0 {
            match (merged.0.get_mut(key), value) {
                (Some(Value::Object(existing)), Value::Object(update)) => {
                    for (k, v) in update {
                        existing.insert(k.clone(), v.clone());
                    }
                }
                _ => {
                    merged.0.insert(key.clone(), value.clone());
                }
            }
        }
        merged
    }
}

impl From<Map<String, Value>> for TemplateData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for TemplateData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn string_map(map: &std::collections::BTreeMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}
