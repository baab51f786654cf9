use crate::adapters::http::HttpSender;
use crate::adapters::webhook::{WebhookAdapter, DEFAULT_MAX_MESSAGES_PER_REQUEST, DEFAULT_METHOD};
use crate::domain::model::MessageType;
use crate::utils::error::{MessagingError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

pub const DEFAULT_TIMEOUT_MILLIS: u64 = 30_000;
pub const MAX_TIMEOUT_MILLIS: u64 = 600_000;
pub const DEFAULT_USER_AGENT_PRODUCT: &str = "Messaging";

const HTTP_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub webhooks: Vec<WebhookConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Caps the total time of one request, connect through body.
    #[serde(default = "default_timeout_millis")]
    pub timeout_millis: u64,
    #[serde(default = "default_user_agent_product")]
    pub user_agent_product: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
            user_agent_product: DEFAULT_USER_AGENT_PRODUCT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub adapter_type: String,
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default = "default_max_messages_per_request")]
    pub max_messages_per_request: usize,
}

fn default_timeout_millis() -> u64 {
    DEFAULT_TIMEOUT_MILLIS
}

fn default_user_agent_product() -> String {
    DEFAULT_USER_AGENT_PRODUCT.to_string()
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_max_messages_per_request() -> usize {
    DEFAULT_MAX_MESSAGES_PER_REQUEST
}

impl MessagingConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MessagingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MessagingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MessagingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn webhook(&self, name: &str) -> Option<&WebhookConfig> {
        self.webhooks.iter().find(|w| w.name == name)
    }

    /// Build one adapter per configured webhook, all sharing a single HTTP client.
    pub fn build_adapters(&self) -> Result<Vec<WebhookAdapter>> {
        let http = HttpSender::new(&self.http)?;
        Ok(self
            .webhooks
            .iter()
            .map(|w| WebhookAdapter::from_config(w, http.clone()))
            .collect())
    }

    pub fn build_adapter(&self, name: &str) -> Result<WebhookAdapter> {
        let webhook = self
            .webhook(name)
            .ok_or_else(|| MessagingError::UnknownAdapter {
                name: name.to_string(),
            })?;
        let http = HttpSender::new(&self.http)?;
        Ok(WebhookAdapter::from_config(webhook, http))
    }
}

impl Validate for MessagingConfig {
    fn validate(&self) -> Result<()> {
        self.http.validate()?;

        let mut seen = HashSet::new();
        for webhook in &self.webhooks {
            webhook.validate()?;
            if !seen.insert(webhook.name.as_str()) {
                return Err(MessagingError::InvalidConfigValueError {
                    field: "webhooks.name".to_string(),
                    value: webhook.name.clone(),
                    reason: "Adapter names must be unique".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for HttpConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range(
            "http.timeout_millis",
            self.timeout_millis,
            1,
            MAX_TIMEOUT_MILLIS,
        )?;
        validation::validate_non_empty_string("http.user_agent_product", &self.user_agent_product)
    }
}

impl Validate for WebhookConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("webhooks.name", &self.name)?;
        validation::validate_one_of("webhooks.type", &self.adapter_type, &MessageType::ALL)?;
        validation::validate_url("webhooks.url", &self.url)?;
        validation::validate_one_of(
            "webhooks.method",
            &self.method.to_uppercase(),
            &HTTP_METHODS,
        )?;
        validation::validate_positive_number(
            "webhooks.max_messages_per_request",
            self.max_messages_per_request,
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Adapter;

    const SAMPLE: &str = r#"
[http]
timeout_millis = 5000
user_agent_product = "Acme"

[[webhooks]]
name = "Ops Hook"
type = "sms"
url = "https://hooks.example.com/notify"
max_messages_per_request = 50

[webhooks.headers]
Authorization = "Bearer abc"

[[webhooks]]
name = "Mail Relay"
type = "email"
url = "http://relay.internal/send"
method = "put"
"#;

    #[test]
    fn test_parse_sample() {
        let config = MessagingConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.http.timeout_millis, 5000);
        assert_eq!(config.http.user_agent_product, "Acme");
        assert_eq!(config.webhooks.len(), 2);

        let ops = config.webhook("Ops Hook").unwrap();
        assert_eq!(ops.adapter_type, "sms");
        assert_eq!(ops.method, "POST");
        assert_eq!(ops.max_messages_per_request, 50);
        assert_eq!(ops.headers.get("Authorization").unwrap(), "Bearer abc");

        let relay = config.webhook("Mail Relay").unwrap();
        assert_eq!(relay.max_messages_per_request, DEFAULT_MAX_MESSAGES_PER_REQUEST);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_defaults_when_section_missing() {
        let config = MessagingConfig::from_toml_str("").unwrap();
        assert_eq!(config.http, HttpConfig::default());
        assert!(config.webhooks.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("MESSAGING_TEST_HOOK_TOKEN", "t0k3n");
        let content = r#"
[[webhooks]]
name = "Hook"
type = "push"
url = "https://example.com/${MESSAGING_TEST_UNSET_VAR}"
headers = { Authorization = "Bearer ${MESSAGING_TEST_HOOK_TOKEN}" }
"#;
        let config = MessagingConfig::from_toml_str(content).unwrap();
        let hook = config.webhook("Hook").unwrap();

        assert_eq!(hook.headers.get("Authorization").unwrap(), "Bearer t0k3n");
        assert_eq!(hook.url, "https://example.com/${MESSAGING_TEST_UNSET_VAR}");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = MessagingConfig::from_toml_str("[[webhooks]\nname=").unwrap_err();
        assert!(matches!(err, MessagingError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let base = MessagingConfig::from_toml_str(SAMPLE).unwrap();

        let mut config = base.clone();
        config.webhooks[0].adapter_type = "fax".to_string();
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.webhooks[0].url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.webhooks[0].max_messages_per_request = 0;
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.webhooks[1].name = "Ops Hook".to_string();
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.http.timeout_millis = 0;
        assert!(config.validate().is_err());

        let mut config = base;
        config.webhooks[1].method = "FETCH".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_adapters() {
        let config = MessagingConfig::from_toml_str(SAMPLE).unwrap();
        let adapters = config.build_adapters().unwrap();

        assert_eq!(adapters.len(), 2);
        assert_eq!(adapters[0].name(), "Ops Hook");
        assert_eq!(adapters[0].max_messages_per_request(), 50);
        assert_eq!(adapters[1].adapter_type(), "email");
        assert_eq!(adapters[1].method(), "PUT");
    }

    #[test]
    fn test_build_unknown_adapter() {
        let config = MessagingConfig::from_toml_str(SAMPLE).unwrap();
        let err = config.build_adapter("Missing").unwrap_err();
        assert!(matches!(err, MessagingError::UnknownAdapter { .. }));
    }
}
