use anyhow::Result;
use httpmock::prelude::*;
use messaging::utils::validation::Validate;
use messaging::{Adapter, Email, Message, MessagingConfig};
use tempfile::TempDir;

#[tokio::test]
async fn test_config_file_to_delivery() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/mail")
            .header("x-api-key", "k-123")
            .header("user-agent", "Relay Mail Relay Sender")
            .json_body_partial(r#"{"type": "email", "subject": "Weekly report"}"#);
        then.status(200).body(r#"{"id":"msg_1"}"#);
    });

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("messaging.toml");
    let config_content = format!(
        r#"
[http]
timeout_millis = 2000
user_agent_product = "Relay"

[[webhooks]]
name = "Mail Relay"
type = "email"
url = "{}"

[webhooks.headers]
X-Api-Key = "k-123"
"#,
        server.url("/mail")
    );
    std::fs::write(&config_path, config_content)?;

    let config = MessagingConfig::from_file(&config_path)?;
    config.validate()?;
    let adapter = config.build_adapter("Mail Relay")?;

    let message = Message::from(Email {
        to: vec!["team@example.com".to_string()],
        subject: "Weekly report".to_string(),
        content: "All systems nominal.".to_string(),
        from_name: "Reports".to_string(),
        from_email: "reports@example.com".to_string(),
        reply_to_name: None,
        reply_to_email: None,
        cc: vec![],
        bcc: vec![],
        html: false,
    });

    let response = adapter.send(&message).await?;

    mock.assert();
    assert_eq!(response, r#"{"id":"msg_1"}"#);
    Ok(())
}

#[test]
fn test_missing_config_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = MessagingConfig::from_file(temp_dir.path().join("absent.toml"));

    let err = result.unwrap_err();
    assert!(matches!(err, messaging::MessagingError::IoError(_)));
    assert_eq!(err.exit_code(), 1);
}
