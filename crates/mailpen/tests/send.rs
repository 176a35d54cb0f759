use std::sync::Arc;

use mailpen::{
    Capabilities, Config, Engine, MailError, Mailpen, MemoryProvider, MemorySource, Message, Phase,
    Provider, TemplateData,
};
use serde_json::json;

fn config() -> Config {
    Config {
        from: "sender@example.com".into(),
        reply_to: "support@example.com".into(),
        company_name: "ACME Corp".into(),
        ..Config::default()
    }
}

fn templates() -> MemorySource {
    MemorySource::new("app")
        .with_file(
            "emails/welcome.html",
            "<h1>Welcome, {{ Name }}!</h1><p>{{ Config.company_name }}</p>",
        )
        .with_file("emails/welcome.txt", "Welcome, {{ Name }}!")
        .with_file("emails/subjected.txt", "Body for {{ Name }}")
        .with_file("emails/broken.txt", "{{ missing.field }}")
}

fn mailpen_with(provider: Arc<MemoryProvider>) -> Mailpen {
    let engine = Engine::builder().source(templates()).build().unwrap();
    Mailpen::with_engine(provider, config(), engine)
}

struct FailingProvider;

impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    fn send(&self, _message: &Message) -> Result<(), MailError> {
        Err(MailError::provider(self.name(), "send failed"))
    }
}

#[test]
fn test_send_without_template() {
    let provider = Arc::new(MemoryProvider::new());
    let mailpen = mailpen_with(provider.clone());

    let message = Message::builder()
        .to(["recipient@example.com"])
        .subject("Test Subject")
        .text_body("plain body")
        .build()
        .unwrap();
    mailpen.send(message).unwrap();

    let sent = provider.last().unwrap();
    assert_eq!(provider.len(), 1);
    assert_eq!(sent.to, vec!["recipient@example.com"]);
    assert_eq!(sent.from, "sender@example.com");
    assert_eq!(sent.reply_to, "support@example.com");
    assert_eq!(sent.text_body, "plain body");
}

#[test]
fn test_send_with_template() {
    let provider = Arc::new(MemoryProvider::new());
    let mailpen = mailpen_with(provider.clone());

    let message = Message::builder()
        .from("custom@example.com")
        .to(["recipient@example.com"])
        .subject("Welcome")
        .template("welcome")
        .data(TemplateData::new().with("Name", "John"))
        .build()
        .unwrap();
    mailpen.send(message).unwrap();

    let sent = provider.last().unwrap();
    assert_eq!(sent.from, "custom@example.com");
    assert!(sent.html_body.contains("<h1>Welcome, John!</h1>"));
    assert!(sent.html_body.contains("ACME Corp"));
    assert!(sent.html_body.contains("All rights reserved"));
    assert!(sent.text_body.starts_with("Welcome, John!"));
    assert!(sent.text_body.contains("ACME Corp"));
}

#[test]
fn test_subject_from_data_replaces_message_subject() {
    let provider = Arc::new(MemoryProvider::new());
    let mailpen = mailpen_with(provider.clone());

    let message = Message::builder()
        .to(["recipient@example.com"])
        .subject("Fallback")
        .template("subjected")
        .serialize_data(&json!({ "Subject": "From data", "Name": "Ana" }))
        .build()
        .unwrap();
    mailpen.send(message).unwrap();

    let sent = provider.last().unwrap();
    assert_eq!(sent.subject, "From data");
    assert!(sent.text_body.starts_with("Body for Ana"));
    assert_eq!(sent.html_body, "");
}

#[test]
fn test_message_data_overrides_config_defaults() {
    let provider = Arc::new(MemoryProvider::new());
    let mailpen = mailpen_with(provider.clone());
    mailpen
        .engine()
        .add_source(MemorySource::new("extra").with_file("emails/company.txt", "{{ CompanyName }}"))
        .unwrap();

    let mut message = Message::builder()
        .to(["recipient@example.com"])
        .template("company")
        .layout("none")
        .build()
        .unwrap();
    // An explicit missing layout must fail; the default layout must not.
    let err = mailpen.prepare(&mut message).unwrap_err();
    assert!(matches!(err, MailError::Render(ref e) if e.phase() == Some(Phase::Execute)));

    message.layout.clear();
    message.data = TemplateData::new().with("CompanyName", "Override Inc");
    mailpen.prepare(&mut message).unwrap();
    assert!(message.text_body.starts_with("Override Inc"));
}

#[test]
fn test_missing_template_is_render_error() {
    let provider = Arc::new(MemoryProvider::new());
    let mailpen = mailpen_with(provider.clone());

    let message = Message::builder()
        .to(["recipient@example.com"])
        .template("nope")
        .build()
        .unwrap();
    let err = mailpen.send(message).unwrap_err();

    assert!(err.to_string().contains("no template found for document \"nope\""));
    assert!(provider.is_empty());
}

#[test]
fn test_template_execute_error_is_not_sent() {
    let provider = Arc::new(MemoryProvider::new());
    let mailpen = mailpen_with(provider.clone());

    let message = Message::builder()
        .to(["recipient@example.com"])
        .subject("x")
        .template("broken")
        .build()
        .unwrap();

    match mailpen.send(message).unwrap_err() {
        MailError::Render(err) => assert_eq!(err.phase(), Some(Phase::Execute)),
        other => panic!("expected render error, got {other:?}"),
    }
    assert!(provider.is_empty());
}

#[test]
fn test_validation_requires_content_and_subject() {
    let provider = Arc::new(MemoryProvider::new());
    let mailpen = mailpen_with(provider.clone());

    let no_body = Message::builder()
        .to(["recipient@example.com"])
        .subject("Hi")
        .build()
        .unwrap();
    assert!(matches!(mailpen.send(no_body), Err(MailError::NoContent)));

    let no_subject = Message::builder()
        .to(["recipient@example.com"])
        .template("welcome")
        .build()
        .unwrap();
    assert!(matches!(mailpen.send(no_subject), Err(MailError::NoSubject)));

    assert!(provider.is_empty());
}

#[test]
fn test_provider_validation_runs_first() {
    let provider = Arc::new(MemoryProvider::with_capabilities(Capabilities {
        max_recipients: 1,
        ..Capabilities::default()
    }));
    let mailpen = mailpen_with(provider.clone());

    let message = Message::builder()
        .to(["a@example.com", "b@example.com"])
        .build()
        .unwrap();
    assert!(matches!(
        mailpen.send(message),
        Err(MailError::TooManyRecipients { count: 2, max: 1 })
    ));
}

#[test]
fn test_provider_failure_is_reported() {
    let mailpen = Mailpen::new(FailingProvider, config()).unwrap();
    assert_eq!(mailpen.provider_name(), "failing");

    let message = Message::builder()
        .to(["recipient@example.com"])
        .subject("Test")
        .text_body("body")
        .build()
        .unwrap();
    let err = mailpen.send(message).unwrap_err();

    assert!(err.to_string().contains("send failed"));
}

#[test]
fn test_new_registers_builtin_templates() {
    let mailpen = Mailpen::new(MemoryProvider::new(), config()).unwrap();
    assert_eq!(mailpen.engine().source_names(), vec!["built-in"]);
    assert_eq!(mailpen.config().company_name, "ACME Corp");
    assert!(mailpen.template_data().contains_key("CurrentYear"));
}
