//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid Stripe API key format")]
    InvalidSecretKey,

    #[error("Invalid Stripe webhook secret format")]
    InvalidWebhookSecret,

    #[error("Invalid API base URL: {0}")]
    InvalidApiBase(String),

    #[error("Invalid API version header value")]
    InvalidApiVersion,

    #[error("Invalid request timeout")]
    InvalidTimeout,
}
