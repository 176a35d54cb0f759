//! Error type for message composition and delivery.

use std::path::PathBuf;

use mailpen_render::{BoxError, RenderError};

/// Error type for all `mailpen` operations.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The message template failed to resolve or render.
    #[error("failed to render email: {0}")]
    Render(#[from] RenderError),

    #[error("email must have at least one recipient")]
    NoRecipients,

    #[error("email must have either plain text or HTML body")]
    NoContent,

    #[error("email must have a subject")]
    NoSubject,

    /// More recipients than the provider accepts.
    #[error("email has {count} recipients but the provider accepts at most {max}")]
    TooManyRecipients { count: usize, max: usize },

    /// An attachment exceeds the provider's size limit.
    #[error("attachment {filename} is {size} bytes but the provider accepts at most {max}")]
    AttachmentTooLarge { filename: String, size: u64, max: u64 },

    /// A file attachment could not be read.
    #[error("failed to read attachment {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is a directory and directories are not supported as attachments", path.display())]
    AttachmentIsDirectory { path: PathBuf },

    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid YAML for [`Config`](crate::Config).
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Template data could not be converted to a map.
    #[error("invalid template data: {0}")]
    Data(String),

    /// The provider rejected or failed to deliver the message.
    #[error("provider {provider} failed: {source}")]
    Provider {
        provider: String,
        #[source]
        source: BoxError,
    },
}

impl MailError {
    /// Wraps a provider-specific failure.
    pub fn provider(provider: impl Into<String>, source: impl Into<BoxError>) -> Self {
        MailError::Provider {
            provider: provider.into(),
            source: source.into(),
        }
    }
}

impl From<serde_json::Error> for MailError {
    fn from(err: serde_json::Error) -> Self {
        MailError::Data(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = MailError::provider("smtp", "connection refused");
        assert_eq!(err.to_string(), "provider smtp failed: connection refused");
    }

    #[test]
    fn test_render_error_is_wrapped() {
        let err: MailError = RenderError::NotFound {
            name: "welcome".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "failed to render email: no template found for document \"welcome\""
        );
    }
}
