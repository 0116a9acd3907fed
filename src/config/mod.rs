//! Client configuration
//!
//! [`StripeConfig`] can be built in code or loaded from the environment with
//! the `config` and `dotenvy` crates. Variables use the `STRIPE` prefix and
//! `__` as the separator.
//!
//! # Example
//!
//! ```no_run
//! use stripe_gateway::config::StripeConfig;
//!
//! let config = StripeConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;

pub use error::{ConfigError, ValidationError};

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::webhook::DEFAULT_TOLERANCE_SECS;

/// Production API host.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// API version this crate's models are written against.
pub const DEFAULT_API_VERSION: &str = "2024-06-20";

/// Default per-request timeout, matching Stripe's own server-side limit.
pub const DEFAULT_TIMEOUT_SECS: u64 = 80;

/// Stripe client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    /// Secret or restricted API key (sk_... / rk_...).
    pub secret_key: SecretString,

    /// Base URL for the API (default: https://api.stripe.com).
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Value sent in the `Stripe-Version` header.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Webhook signing secret (whsec_...).
    #[serde(default)]
    pub webhook_secret: Option<SecretString>,

    /// Accepted webhook timestamp drift in seconds; 0 disables the check.
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_webhook_tolerance() -> u64 {
    DEFAULT_TOLERANCE_SECS
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl StripeConfig {
    /// Creates a configuration with defaults for everything but the key.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            api_base: default_api_base(),
            api_version: default_api_version(),
            webhook_secret: None,
            webhook_tolerance_secs: default_webhook_tolerance(),
            timeout_secs: default_timeout(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads variables with the `STRIPE` prefix, `__` separated
    ///
    /// # Environment Variable Format
    ///
    /// - `STRIPE__SECRET_KEY=sk_test_...` -> `secret_key`
    /// - `STRIPE__WEBHOOK_SECRET=whsec_...` -> `webhook_secret`
    /// - `STRIPE__TIMEOUT_SECS=30` -> `timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` if the key is missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("STRIPE").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Set a custom API base URL (for testing).
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Pin a different API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(SecretString::new(secret.into()));
        self
    }

    pub fn with_webhook_tolerance(mut self, tolerance_secs: u64) -> Self {
        self.webhook_tolerance_secs = tolerance_secs;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        let key = self.secret_key.expose_secret();
        key.starts_with("sk_test_") || key.starts_with("rk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        let key = self.secret_key.expose_secret();
        key.starts_with("sk_live_") || key.starts_with("rk_live_")
    }

    /// Validate configuration values
    ///
    /// - API key present with an `sk_` or `rk_` prefix
    /// - webhook secret, when set, has a `whsec_` prefix
    /// - base URL is http(s) and the timeout is non-zero
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.secret_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE__SECRET_KEY"));
        }
        if !(key.starts_with("sk_") || key.starts_with("rk_")) {
            return Err(ValidationError::InvalidSecretKey);
        }

        if let Some(secret) = &self.webhook_secret {
            if !secret.expose_secret().starts_with("whsec_") {
                return Err(ValidationError::InvalidWebhookSecret);
            }
        }

        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(ValidationError::InvalidApiBase(self.api_base.clone()));
        }

        if self.api_version.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE__API_VERSION"));
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("STRIPE__SECRET_KEY");
        env::remove_var("STRIPE__WEBHOOK_SECRET");
        env::remove_var("STRIPE__API_BASE");
        env::remove_var("STRIPE__TIMEOUT_SECS");
    }

    // ══════════════════════════════════════════════════════════════
    // Loading
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("STRIPE__SECRET_KEY", "sk_test_env");
        env::set_var("STRIPE__WEBHOOK_SECRET", "whsec_env");
        env::set_var("STRIPE__TIMEOUT_SECS", "30");
        let result = StripeConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.secret_key.expose_secret(), "sk_test_env");
        assert_eq!(
            config.webhook_secret.as_ref().map(|s| s.expose_secret().as_str()),
            Some("whsec_env")
        );
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.webhook_tolerance_secs, 300);
    }

    #[test]
    fn test_load_without_key_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = StripeConfig::load();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Builder
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn test_new_uses_defaults() {
        let config = StripeConfig::new("sk_test_xxx");

        assert_eq!(config.api_base, "https://api.stripe.com");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert!(config.webhook_secret.is_none());
        assert_eq!(config.timeout(), Duration::from_secs(80));
    }

    #[test]
    fn test_builder_overrides() {
        let config = StripeConfig::new("sk_test_xxx")
            .with_api_base("http://localhost:12111")
            .with_api_version("2023-10-16")
            .with_timeout(5);

        assert_eq!(config.api_base, "http://localhost:12111");
        assert_eq!(config.api_version, "2023-10-16");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_is_test_mode() {
        let config = StripeConfig::new("sk_test_xxx");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode() {
        let config = StripeConfig::new("rk_live_xxx");
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let config = StripeConfig::new("sk_test_supersecret");
        assert!(!format!("{:?}", config).contains("supersecret"));
    }

    // ══════════════════════════════════════════════════════════════
    // Validation
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn test_validation_valid_config() {
        let config = StripeConfig::new("sk_test_abcd1234").with_webhook_secret("whsec_xyz789");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = StripeConfig::new("");
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("STRIPE__SECRET_KEY"))
        );
    }

    #[test]
    fn test_validation_publishable_key_rejected() {
        let config = StripeConfig::new("pk_test_xxx");
        assert_eq!(config.validate(), Err(ValidationError::InvalidSecretKey));
    }

    #[test]
    fn test_validation_invalid_webhook_secret_prefix() {
        let config = StripeConfig::new("sk_test_xxx").with_webhook_secret("secret_xxx");
        assert_eq!(config.validate(), Err(ValidationError::InvalidWebhookSecret));
    }

    #[test]
    fn test_validation_invalid_api_base() {
        let config = StripeConfig::new("sk_test_xxx").with_api_base("api.stripe.com");
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidApiBase(_))
        ));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = StripeConfig::new("sk_test_xxx").with_timeout(0);
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
