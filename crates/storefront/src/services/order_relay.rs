//! Order webhook client.
//!
//! Posts order-intent payloads as JSON to a third-party webhook (a
//! spreadsheet-backed form relay). The relay's response body is opaque; only
//! transport failures and non-success statuses count as errors.

use std::future::Future;

use secrecy::ExposeSecret;
use thiserror::Error;
use url::Url;

use crate::config::RelayConfig;
use crate::models::order::OrderPayload;

/// Errors that can occur when relaying an order.
#[derive(Debug, Error)]
pub enum RelayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Webhook answered with a non-success status.
    #[error("Webhook rejected order: {status}")]
    Rejected { status: u16 },

    /// Webhook URL could not be parsed.
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Destination for order-intent payloads.
pub trait OrderSink {
    /// Deliver a payload.
    ///
    /// # Errors
    ///
    /// Returns `RelayError` if the payload was not accepted.
    fn submit(&self, payload: &OrderPayload) -> impl Future<Output = Result<(), RelayError>>;
}

/// Webhook-backed [`OrderSink`].
#[derive(Clone)]
pub struct OrderRelay {
    client: reqwest::Client,
    url: Url,
}

impl OrderRelay {
    /// Create a relay client.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the HTTP client fails to build.
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let url = Url::parse(config.webhook_url.expose_secret())?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, url })
    }
}

impl std::fmt::Debug for OrderRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Apps Script style webhook URLs embed their credential in the path.
        f.debug_struct("OrderRelay")
            .field("host", &self.url.host_str())
            .field("url", &"[REDACTED]")
            .finish()
    }
}

impl OrderSink for OrderRelay {
    async fn submit(&self, payload: &OrderPayload) -> Result<(), RelayError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::info!(status = status.as_u16(), "Order relayed");
        Ok(())
    }
}
