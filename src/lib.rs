pub mod adapters;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpSender, webhook::WebhookAdapter};
pub use config::{HttpConfig, MessagingConfig, WebhookConfig};
pub use domain::model::{Email, Message, MessageType, Push, Sms};
pub use domain::ports::Adapter;
pub use utils::error::{DeliveryError, MessagingError, Result};
