use crate::adapters::http::HttpSender;
use crate::config::WebhookConfig;
use crate::domain::model::Message;
use crate::domain::ports::Adapter;
use crate::utils::error::DeliveryError;
use async_trait::async_trait;

pub const DEFAULT_METHOD: &str = "POST";
pub const DEFAULT_MAX_MESSAGES_PER_REQUEST: usize = 1000;

/// Delivers a message as a JSON document to a fixed endpoint.
///
/// The body is the serialized [`Message`], tagged with its `type`.
#[derive(Debug, Clone)]
pub struct WebhookAdapter {
    name: String,
    adapter_type: String,
    url: String,
    method: String,
    headers: Vec<(String, String)>,
    max_messages_per_request: usize,
    http: HttpSender,
}

impl WebhookAdapter {
    pub fn new(
        name: impl Into<String>,
        adapter_type: impl Into<String>,
        url: impl Into<String>,
        http: HttpSender,
    ) -> Self {
        Self {
            name: name.into(),
            adapter_type: adapter_type.into(),
            url: url.into(),
            method: DEFAULT_METHOD.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            max_messages_per_request: DEFAULT_MAX_MESSAGES_PER_REQUEST,
            http,
        }
    }

    pub fn from_config(config: &WebhookConfig, http: HttpSender) -> Self {
        let mut adapter = Self::new(&config.name, &config.adapter_type, &config.url, http)
            .with_method(&config.method)
            .with_max_messages_per_request(config.max_messages_per_request);
        for (name, value) in &config.headers {
            adapter = adapter.with_header(name, value);
        }
        adapter
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into().to_uppercase();
        self
    }

    /// Add a header; a header with the same name (case-insensitive) is replaced.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_max_messages_per_request(mut self, max: usize) -> Self {
        self.max_messages_per_request = max;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

#[async_trait]
impl Adapter for WebhookAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn adapter_type(&self) -> &str {
        &self.adapter_type
    }

    fn max_messages_per_request(&self) -> usize {
        self.max_messages_per_request
    }

    async fn send(&self, message: &Message) -> Result<String, DeliveryError> {
        let body = serde_json::to_string(message)
            .map_err(|e| DeliveryError::transport(format!("Failed to encode message: {}", e)))?;

        tracing::debug!(
            adapter = %self.name,
            message_type = %message.message_type(),
            recipients = message.recipients().len(),
            "Delivering message via webhook"
        );

        self.http
            .request(&self.name, &self.method, &self.url, &self.headers, Some(&body))
            .await
    }
}
