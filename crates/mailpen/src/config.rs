//! Sender and branding configuration.
//!
//! [`Config`] is plain data. It seeds the default [`TemplateData`] for every
//! message and is exposed to templates as `Config`.
//!
//! ```rust
//! use mailpen::Config;
//!
//! let config = Config::from_yaml(r#"
//! from: hello@example.com
//! company_name: Acme
//! site_links:
//!   pricing: https://example.com/pricing
//! "#).unwrap();
//!
//! assert_eq!(config.company_name, "Acme");
//! assert_eq!(config.site_links["pricing"], "https://example.com/pricing");
//! ```
//!
//! [`TemplateData`]: crate::TemplateData

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MailError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sender used when a message does not set one.
    pub from: String,
    pub reply_to: String,

    pub base_url: String,
    /// Usually the street address.
    pub company_address1: String,
    /// Usually city, state and postal code.
    pub company_address2: String,
    pub company_name: String,
    pub logo_url: String,
    pub support_email: String,
    pub support_phone: String,
    pub website_name: String,
    pub website_url: String,

    pub site_links: BTreeMap<String, String>,
    pub social_media_links: BTreeMap<String, String>,
}

impl Config {
    /// Parses a configuration from YAML. Missing fields are empty.
    pub fn from_yaml(content: &str) -> Result<Self, MailError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Loads a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MailError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| MailError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_yaml_defaults_missing_fields() {
        let config = Config::from_yaml("company_name: Acme\n").unwrap();
        assert_eq!(config.company_name, "Acme");
        assert!(config.from.is_empty());
        assert!(config.social_media_links.is_empty());
    }

    #[test]
    fn test_from_yaml_rejects_wrong_types() {
        let err = Config::from_yaml("site_links: [1, 2]\n").unwrap_err();
        assert!(matches!(err, MailError::ConfigParse(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mail.yaml");
        fs::write(
            &path,
            "from: noreply@example.com\nsocial_media_links:\n  mastodon: https://example.social/@acme\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.from, "noreply@example.com");
        assert_eq!(
            config.social_media_links.get("mastodon").map(String::as_str),
            Some("https://example.social/@acme")
        );
    }

    #[test]
    fn test_from_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, MailError::ConfigLoad { .. }));
    }
}
