use crate::config::HttpConfig;
use crate::utils::error::{DeliveryError, MessagingError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, USER_AGENT};
use reqwest::{redirect, Client, Method};
use std::time::Duration;

/// Request executor shared by all adapters.
///
/// Owns one `reqwest::Client`; clones share its connection pool.
#[derive(Debug, Clone)]
pub struct HttpSender {
    client: Client,
    product: String,
}

impl HttpSender {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        // Redirects are surfaced to the caller as plain 3xx responses.
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_millis))
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| MessagingError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            product: config.user_agent_product.clone(),
        })
    }

    pub fn user_agent(&self, sender_name: &str) -> String {
        format!("{} {} Sender", self.product, sender_name)
    }

    /// Perform a single request on behalf of `sender_name`.
    ///
    /// `Content-Length` and `User-Agent` are always set here and override any
    /// caller-supplied values. Any status of 400 or above is an error carrying
    /// the response body; everything else returns the body as received.
    pub async fn request(
        &self,
        sender_name: &str,
        method: &str,
        url: &str,
        headers: &[(String, String)],
        body: Option<&str>,
    ) -> std::result::Result<String, DeliveryError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| DeliveryError::transport(format!("Invalid HTTP method: {}", method)))?;
        let header_map = self.build_headers(sender_name, headers, body)?;

        tracing::debug!(%method, url, sender = sender_name, "Sending provider request");

        let mut request = self.client.request(method, url).headers(header_map);
        if let Some(body) = body {
            request = request.body(body.to_owned());
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), sender = sender_name, "Provider responded");

        let bytes = response.bytes().await?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        if status.as_u16() >= 400 {
            return Err(DeliveryError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    pub(crate) fn build_headers(
        &self,
        sender_name: &str,
        headers: &[(String, String)],
        body: Option<&str>,
    ) -> std::result::Result<HeaderMap, DeliveryError> {
        let mut map = HeaderMap::with_capacity(headers.len() + 2);

        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                DeliveryError::transport(format!("Invalid header name: {}", name))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                DeliveryError::transport(format!("Invalid value for header {}", name))
            })?;
            map.append(header_name, header_value);
        }

        let content_length = body.map(str::len).unwrap_or(0);
        map.insert(CONTENT_LENGTH, HeaderValue::from(content_length));

        let user_agent = HeaderValue::from_str(&self.user_agent(sender_name)).map_err(|_| {
            DeliveryError::transport(format!("Invalid sender name for User-Agent: {}", sender_name))
        })?;
        map.insert(USER_AGENT, user_agent);

        Ok(map)
    }
}
