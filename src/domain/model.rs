use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Delivery channel a message or adapter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Email,
    Sms,
    Push,
}

impl MessageType {
    pub const ALL: [&'static str; 3] = ["email", "sms", "push"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Email => "email",
            MessageType::Sms => "sms",
            MessageType::Push => "push",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub to: Vec<String>,
    pub subject: String,
    pub content: String,
    pub from_name: String,
    pub from_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,
    #[serde(default)]
    pub html: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sms {
    pub to: Vec<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Push {
    pub to: Vec<String>,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, String>>,
}

/// A payload handed to an adapter for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Email(Email),
    Sms(Sms),
    Push(Push),
}

impl Message {
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::Email(_) => MessageType::Email,
            Message::Sms(_) => MessageType::Sms,
            Message::Push(_) => MessageType::Push,
        }
    }

    pub fn recipients(&self) -> &[String] {
        match self {
            Message::Email(email) => &email.to,
            Message::Sms(sms) => &sms.to,
            Message::Push(push) => &push.to,
        }
    }
}

impl From<Email> for Message {
    fn from(email: Email) -> Self {
        Message::Email(email)
    }
}

impl From<Sms> for Message {
    fn from(sms: Sms) -> Self {
        Message::Sms(sms)
    }
}

impl From<Push> for Message {
    fn from(push: Push) -> Self {
        Message::Push(push)
    }
}
