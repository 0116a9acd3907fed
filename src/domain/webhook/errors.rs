//! Webhook error types.

use thiserror::Error;

/// Why a `Stripe-Signature` header failed verification.
///
/// None of these are worth retrying: the same inputs always produce the same
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Header has no timestamp, or the timestamp is not an integer.
    #[error("unable to parse signature header: {0}")]
    HeaderParse(String),

    /// No `v1` signature in the header matches the payload.
    #[error("no signatures found matching the expected signature for payload")]
    NoMatchingSignature,

    /// Timestamp is further than the tolerance from the current time.
    #[error("timestamp {timestamp} outside the tolerance zone ({tolerance_secs}s from {now})")]
    StaleTimestamp {
        timestamp: i64,
        now: i64,
        tolerance_secs: u64,
    },
}

/// Errors from building an event out of a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Payload was authentic but is not a valid event.
    #[error("invalid event payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// No signing secret was configured.
    #[error("webhook signing secret not configured")]
    MissingSecret,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_timestamp_display() {
        let err = SignatureError::StaleTimestamp {
            timestamp: 100,
            now: 500,
            tolerance_secs: 300,
        };
        assert_eq!(
            err.to_string(),
            "timestamp 100 outside the tolerance zone (300s from 500)"
        );
    }

    #[test]
    fn signature_error_converts_to_webhook_error() {
        let err: WebhookError = SignatureError::NoMatchingSignature.into();
        assert!(matches!(
            err,
            WebhookError::Signature(SignatureError::NoMatchingSignature)
        ));
    }
}
