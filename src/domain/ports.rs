use crate::domain::model::Message;
use crate::utils::error::DeliveryError;
use async_trait::async_trait;

/// A pluggable delivery backend for one provider.
///
/// `name` and `adapter_type` are fixed for a given adapter and never fail.
/// `send` makes exactly one attempt; retrying is left to the caller, and a
/// retry after a failure may deliver the message twice.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Display name of the provider, e.g. "SendGrid".
    fn name(&self) -> &str;

    /// Channel identifier, e.g. "email".
    fn adapter_type(&self) -> &str;

    /// Largest number of recipients the provider accepts in one request.
    fn max_messages_per_request(&self) -> usize;

    /// Deliver `message` and return the raw provider response body.
    async fn send(&self, message: &Message) -> Result<String, DeliveryError>;
}
