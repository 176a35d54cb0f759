//! Delivery providers.
//!
//! A [`Provider`] hands a fully rendered [`Message`] to some transport. This
//! crate ships no network transport; it provides [`MemoryProvider`], which
//! records messages (for tests and previews), and [`LogProvider`], which
//! emits a `tracing` event per message.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::error::MailError;
use crate::message::Message;

/// What a provider accepts. Zero limits mean unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub max_recipients: usize,
    pub max_attachment_size: u64,
    pub supports_templates: bool,
    pub supports_html_only: bool,
    pub supports_scheduling: bool,
}

impl Capabilities {
    /// Checks `message` against the recipient and attachment limits.
    pub fn check(&self, message: &Message) -> Result<(), MailError> {
        let count = message.recipient_count();
        if self.max_recipients > 0 && count > self.max_recipients {
            return Err(MailError::TooManyRecipients {
                count,
                max: self.max_recipients,
            });
        }

        if self.max_attachment_size > 0 {
            if let Some(attachment) = message
                .attachments
                .iter()
                .find(|attachment| attachment.size() > self.max_attachment_size)
            {
                return Err(MailError::AttachmentTooLarge {
                    filename: attachment.filename.clone(),
                    size: attachment.size(),
                    max: self.max_attachment_size,
                });
            }
        }

        Ok(())
    }
}

/// Delivers messages.
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> Capabilities;

    /// Rejects messages this provider cannot deliver.
    ///
    /// Defaults to checking the message against [`capabilities`](Self::capabilities).
    fn validate(&self, message: &Message) -> Result<(), MailError> {
        self.capabilities().check(message)
    }

    fn send(&self, message: &Message) -> Result<(), MailError>;
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn validate(&self, message: &Message) -> Result<(), MailError> {
        (**self).validate(message)
    }

    fn send(&self, message: &Message) -> Result<(), MailError> {
        (**self).send(message)
    }
}

/// Keeps every sent message in memory.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    capabilities: Capabilities,
    sent: Mutex<Vec<Message>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            sent: Mutex::default(),
        }
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().clone()
    }

    pub fn last(&self) -> Option<Message> {
        self.sent.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn send(&self, message: &Message) -> Result<(), MailError> {
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

/// Logs each message at `info` level instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProvider;

impl Provider for LogProvider {
    fn name(&self) -> &str {
        "log"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            supports_templates: true,
            supports_html_only: true,
            ..Capabilities::default()
        }
    }

    fn send(&self, message: &Message) -> Result<(), MailError> {
        info!(
            from = message.from.as_str(),
            to = ?message.to,
            subject = message.subject.as_str(),
            text_bytes = message.text_body.len(),
            html_bytes = message.html_body.len(),
            attachments = message.attachments.len(),
            "email not delivered (log provider)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Attachment;

    fn message(recipients: usize) -> Message {
        Message {
            to: (0..recipients).map(|i| format!("user{i}@example.com")).collect(),
            ..Message::default()
        }
    }

    #[test]
    fn test_zero_limits_are_unlimited() {
        let mut msg = message(500);
        msg.attachments.push(Attachment::new("big.bin", vec![0u8; 4096]));
        assert!(Capabilities::default().check(&msg).is_ok());
    }

    #[test]
    fn test_recipient_limit_counts_cc_and_bcc() {
        let caps = Capabilities {
            max_recipients: 2,
            ..Capabilities::default()
        };
        let mut msg = message(1);
        msg.cc.push("cc@example.com".into());
        assert!(caps.check(&msg).is_ok());

        msg.bcc.push("bcc@example.com".into());
        assert!(matches!(
            caps.check(&msg),
            Err(MailError::TooManyRecipients { count: 3, max: 2 })
        ));
    }

    #[test]
    fn test_attachment_limit() {
        let caps = Capabilities {
            max_attachment_size: 10,
            ..Capabilities::default()
        };
        let mut msg = message(1);
        msg.attachments.push(Attachment::new("small.txt", "tiny"));
        msg.attachments.push(Attachment::new("large.txt", "x".repeat(11)));

        match caps.check(&msg) {
            Err(MailError::AttachmentTooLarge { filename, size, max }) => {
                assert_eq!(filename, "large.txt");
                assert_eq!(size, 11);
                assert_eq!(max, 10);
            }
            other => panic!("expected attachment error, got {other:?}"),
        }
    }

    #[test]
    fn test_memory_provider_records() {
        let provider = Arc::new(MemoryProvider::new());
        let shared: Arc<dyn Provider> = provider.clone();

        shared.send(&message(1)).unwrap();
        shared.send(&message(2)).unwrap();

        assert_eq!(provider.len(), 2);
        assert_eq!(provider.last().unwrap().to.len(), 2);
        provider.clear();
        assert!(provider.is_empty());
    }
}
