use thiserror::Error;

/// Why a single delivery attempt failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// No HTTP response was obtained (DNS, connect, TLS, timeout, malformed request).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The provider answered with a status code of 400 or above.
    #[error("Provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

impl DeliveryError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// HTTP status code, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }

    /// Raw provider response body, when a response was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } => Some(body),
            Self::Transport { .. } => None,
        }
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        Self::Transport { message }
    }
}

#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown adapter: {name}")]
    UnknownAdapter { name: String },
}

impl MessagingError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Delivery(DeliveryError::Transport { message }) => {
                format!("Could not reach the provider: {}", message)
            }
            Self::Delivery(DeliveryError::HttpStatus { status, body }) => {
                format!("The provider rejected the message (HTTP {}): {}", status, body)
            }
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::SerializationError(e) => format!("Message is not valid JSON: {}", e),
            Self::UnknownAdapter { name } => {
                format!("No adapter named '{}' is configured", name)
            }
            other => other.to_string(),
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Delivery(DeliveryError::Transport { .. }) => 2,
            Self::Delivery(DeliveryError::HttpStatus { .. }) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, MessagingError>;
