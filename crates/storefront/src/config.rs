//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `EBOOKS_DATA_DIR` - Directory for the local cart store (default: .ebooks)
//! - `EBOOKS_CART_KEY` - Key the cart snapshot is stored under (default: ebooks-cart)
//! - `EBOOKS_CURRENCY` - ISO 4217 code used for display (default: USD)
//! - `EBOOKS_ORDER_WEBHOOK_URL` - Order relay webhook; checkout is disabled without it
//! - `EBOOKS_RELAY_TIMEOUT_SECS` - Webhook request timeout (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use ebooks_core::CurrencyCode;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use crate::storage::{DEFAULT_CART_KEY, validate_key};

const DEFAULT_DATA_DIR: &str = ".ebooks";
const DEFAULT_RELAY_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the file-backed cart store
    pub data_dir: PathBuf,
    /// Key the cart snapshot is persisted under
    pub cart_key: String,
    /// Currency used when displaying prices
    pub currency: CurrencyCode,
    /// Order webhook configuration, if checkout is enabled
    pub relay: Option<RelayConfig>,
}

/// Order webhook configuration.
///
/// Implements `Debug` manually to redact the webhook URL, which carries
/// its access credential.
#[derive(Clone)]
pub struct RelayConfig {
    /// Full webhook URL
    pub webhook_url: SecretString,
    /// Request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("webhook_url", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_owned(),
            currency: CurrencyCode::default(),
            relay: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let data_dir = PathBuf::from(get_or_default("EBOOKS_DATA_DIR", DEFAULT_DATA_DIR));

        let cart_key = get_or_default("EBOOKS_CART_KEY", DEFAULT_CART_KEY);
        validate_key(&cart_key)
            .map_err(|e| ConfigError::InvalidEnvVar("EBOOKS_CART_KEY".to_string(), e.to_string()))?;

        let currency = get_or_default("EBOOKS_CURRENCY", CurrencyCode::default().code())
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("EBOOKS_CURRENCY".to_string(), e.to_string())
            })?;

        let relay = match lookup("EBOOKS_ORDER_WEBHOOK_URL") {
            Some(url) => {
                let timeout_secs =
                    get_or_default("EBOOKS_RELAY_TIMEOUT_SECS", DEFAULT_RELAY_TIMEOUT_SECS);
                Some(RelayConfig::new(url, &timeout_secs)?)
            }
            None => None,
        };

        Ok(Self {
            data_dir,
            cart_key,
            currency,
            relay,
        })
    }
}

impl RelayConfig {
    fn new(url: String, timeout_secs: &str) -> Result<Self, ConfigError> {
        validate_webhook_url(&url, "EBOOKS_ORDER_WEBHOOK_URL")?;
        let timeout = timeout_secs
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "EBOOKS_RELAY_TIMEOUT_SECS".to_string(),
                    format!("expected a positive number of seconds, got {timeout_secs:?}"),
                )
            })?;
        Ok(Self {
            webhook_url: SecretString::from(url),
            timeout,
        })
    }

    /// Host portion of the webhook URL, safe to log.
    #[must_use]
    pub fn host(&self) -> Option<String> {
        Url::parse(self.webhook_url.expose_secret())
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate that a webhook URL is absolute and uses HTTP(S).
fn validate_webhook_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".ebooks"));
        assert_eq!(config.cart_key, "ebooks-cart");
        assert_eq!(config.currency, CurrencyCode::USD);
        assert!(config.relay.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("EBOOKS_DATA_DIR", "/var/lib/ebooks"),
            ("EBOOKS_CART_KEY", "cart-v2"),
            ("EBOOKS_CURRENCY", "inr"),
            ("EBOOKS_ORDER_WEBHOOK_URL", "https://script.example.com/exec"),
            ("EBOOKS_RELAY_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/ebooks"));
        assert_eq!(config.cart_key, "cart-v2");
        assert_eq!(config.currency, CurrencyCode::INR);
        let relay = config.relay.as_ref().unwrap();
        assert_eq!(relay.timeout, Duration::from_secs(3));
        assert_eq!(relay.host().as_deref(), Some("script.example.com"));
    }

    #[test]
    fn test_invalid_cart_key() {
        let result = StorefrontConfig::from_lookup(lookup(&[("EBOOKS_CART_KEY", "../cart")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(name, _)) if name == "EBOOKS_CART_KEY"));
    }

    #[test]
    fn test_invalid_currency() {
        let result = StorefrontConfig::from_lookup(lookup(&[("EBOOKS_CURRENCY", "DOGE")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(name, _)) if name == "EBOOKS_CURRENCY"));
    }

    #[test]
    fn test_webhook_must_be_http() {
        assert!(validate_webhook_url("https://example.com/hook", "X").is_ok());
        assert!(validate_webhook_url("ftp://example.com/hook", "X").is_err());
        assert!(validate_webhook_url("example.com/hook", "X").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = StorefrontConfig::from_lookup(lookup(&[
            ("EBOOKS_ORDER_WEBHOOK_URL", "https://example.com/hook"),
            ("EBOOKS_RELAY_TIMEOUT_SECS", "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(name, _)) if name == "EBOOKS_RELAY_TIMEOUT_SECS"));
    }

    #[test]
    fn test_relay_config_debug_redacts_url() {
        let config = RelayConfig {
            webhook_url: SecretString::from("https://script.example.com/macros/s/super_secret/exec"),
            timeout: Duration::from_secs(10),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret"));
    }
}
