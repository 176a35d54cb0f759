//! Email messages and their builder.
//!
//! A [`Message`] carries recipients, the template to render (if any), the
//! data to render it with, and the bodies. Bodies are usually filled in by
//! [`Mailpen::send`](crate::Mailpen::send) from the template, but can be set
//! directly for messages that need no template.
//!
//! ```rust
//! use mailpen::{Message, TemplateData};
//!
//! let message = Message::builder()
//!     .to(["ana@example.com"])
//!     .subject("Welcome")
//!     .template("welcome")
//!     .data(TemplateData::new().with("Name", "Ana"))
//!     .attach("notes.txt", b"hello".to_vec())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(message.to, vec!["ana@example.com"]);
//! assert_eq!(message.attachments[0].content_type().as_str(), "text/plain");
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::MailError;
use crate::template_data::TemplateData;

/// MIME type of a body part or attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Arbitrary binary data; the fallback for unknown extensions.
    AppOctetStream,
    MultipartAlternative,
    MultipartMixed,
    MultipartRelated,
    PgpSignature,
    PgpEncrypted,
    TextHtml,
    TextPlain,
    /// Any other MIME type, verbatim.
    Other(String),
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::AppOctetStream => "application/octet-stream",
            ContentType::MultipartAlternative => "multipart/alternative",
            ContentType::MultipartMixed => "multipart/mixed",
            ContentType::MultipartRelated => "multipart/related",
            ContentType::PgpSignature => "application/pgp-signature",
            ContentType::PgpEncrypted => "application/pgp-encrypted",
            ContentType::TextHtml => "text/html",
            ContentType::TextPlain => "text/plain",
            ContentType::Other(mime) => mime,
        }
    }

    /// Infers a content type from a file name's extension.
    pub fn from_filename(filename: &str) -> ContentType {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("html" | "htm") => ContentType::TextHtml,
            Some("txt" | "text") => ContentType::TextPlain,
            Some("asc" | "sig") => ContentType::PgpSignature,
            Some("pgp" | "gpg") => ContentType::PgpEncrypted,
            _ => ContentType::AppOctetStream,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ContentType {
    fn from(mime: &str) -> Self {
        match mime {
            "application/octet-stream" => ContentType::AppOctetStream,
            "multipart/alternative" => ContentType::MultipartAlternative,
            "multipart/mixed" => ContentType::MultipartMixed,
            "multipart/related" => ContentType::MultipartRelated,
            "application/pgp-signature" => ContentType::PgpSignature,
            "application/pgp-encrypted" => ContentType::PgpEncrypted,
            "text/html" => ContentType::TextHtml,
            "text/plain" => ContentType::TextPlain,
            other => ContentType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub data: Vec<u8>,
    /// Explicit type; inferred from `filename` when `None`.
    pub content_type: Option<ContentType>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
            content_type: None,
        }
    }

    /// Reads a file into an attachment named after the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MailError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| MailError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.is_dir() {
            return Err(MailError::AttachmentIsDirectory {
                path: path.to_path_buf(),
            });
        }

        let data = fs::read(path).map_err(|source| MailError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(filename, data))
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
            .clone()
            .unwrap_or_else(|| ContentType::from_filename(&self.filename))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// An email ready to render and send.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    /// Defaults to [`Config::from`](crate::Config::from) when empty.
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub reply_to: String,
    /// Replaced by the template's `Subject` when it renders one.
    pub subject: String,
    pub data: TemplateData,
    /// Layout name; empty for the engine default.
    pub layout: String,
    /// Document to render; empty for a message without a template.
    pub template: String,
    pub text_body: String,
    pub html_body: String,
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Count of `to`, `cc` and `bcc` addresses.
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }

    /// Checks the message is complete enough to send.
    pub fn validate(&self) -> Result<(), MailError> {
        if self.to.is_empty() {
            return Err(MailError::NoRecipients);
        }
        if self.text_body.is_empty() && self.html_body.is_empty() {
            return Err(MailError::NoContent);
        }
        if self.subject.is_empty() {
            return Err(MailError::NoSubject);
        }
        Ok(())
    }
}

/// Fluent construction of a [`Message`].
///
/// The first failing step (such as an unreadable file attachment) is kept and
/// returned by [`build`](Self::build); later steps are ignored.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    message: Message,
    error: Option<MailError>,
}

impl MessageBuilder {
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.message.from = address.into();
        self
    }

    pub fn to<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message.to.extend(addresses.into_iter().map(Into::into));
        self
    }

    pub fn cc<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message.cc.extend(addresses.into_iter().map(Into::into));
        self
    }

    pub fn bcc<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message.bcc.extend(addresses.into_iter().map(Into::into));
        self
    }

    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.message.reply_to = address.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.message.subject = subject.into();
        self
    }

    /// Replaces the template data.
    pub fn data(mut self, data: TemplateData) -> Self {
        self.message.data = data;
        self
    }

    /// Replaces the template data with any serializable map-like value.
    pub fn serialize_data<T: serde::Serialize + ?Sized>(mut self, data: &T) -> Self {
        if self.error.is_none() {
            match TemplateData::from_serialize(data) {
                Ok(data) => self.message.data = data,
                Err(err) => self.error = Some(err),
            }
        }
        self
    }

    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.message.template = name.into();
        self
    }

    pub fn layout(mut self, name: impl Into<String>) -> Self {
        self.message.layout = name.into();
        self
    }

    pub fn text_body(mut self, body: impl Into<String>) -> Self {
        self.message.text_body = body.into();
        self
    }

    pub fn html_body(mut self, body: impl Into<String>) -> Self {
        self.message.html_body = body.into();
        self
    }

    /// Attaches in-memory data; the content type is inferred from `filename`.
    pub fn attach(mut self, filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.message.attachments.push(Attachment::new(filename, data));
        self
    }

    pub fn attach_with_content_type(
        mut self,
        filename: impl Into<String>,
        data: impl Into<Vec<u8>>,
        content_type: ContentType,
    ) -> Self {
        let mut attachment = Attachment::new(filename, data);
        attachment.content_type = Some(content_type);
        self.message.attachments.push(attachment);
        self
    }

    /// Reads and attaches a file. Failures surface from [`build`](Self::build).
    pub fn attach_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        if self.error.is_none() {
            match Attachment::from_file(path) {
                Ok(attachment) => self.message.attachments.push(attachment),
                Err(err) => self.error = Some(err),
            }
        }
        self
    }

    /// Finishes the message.
    ///
    /// # Errors
    ///
    /// Returns the first deferred builder error, or
    /// [`MailError::NoRecipients`] when no `to` address was given.
    pub fn build(self) -> Result<Message, MailError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.message.to.is_empty() {
            return Err(MailError::NoRecipients);
        }
        Ok(self.message)
    }
}
