//! Webhook authentication and event construction.
//!
//! Verification needs the exact bytes Stripe sent. Parse the body only after
//! [`Webhook::construct_event`] (or [`WebhookVerifier::verify`]) accepts it.

mod errors;
mod signature;

pub use errors::{SignatureError, WebhookError};
pub use signature::{
    generate_test_header, verify_header, verify_header_at, SignatureHeader,
    DEFAULT_TOLERANCE_SECS, SIGNATURE_SCHEME,
};

use secrecy::{ExposeSecret, SecretString};

use crate::config::StripeConfig;
use crate::domain::resources::Event;

/// Stateless entry points for webhook handling.
pub struct Webhook;

impl Webhook {
    /// Verifies the delivery and decodes it as an [`Event`].
    ///
    /// # Errors
    ///
    /// - `Signature` - header malformed, no matching signature, or stale
    /// - `Parse` - authentic payload that is not an event
    pub fn construct_event(
        payload: &[u8],
        signature_header: &str,
        secret: &str,
        tolerance_secs: u64,
    ) -> Result<Event, WebhookError> {
        if let Err(e) = verify_header(payload, signature_header, secret, tolerance_secs) {
            tracing::warn!(error = %e, "Webhook signature verification failed");
            return Err(e.into());
        }

        let event: Event = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Verified webhook payload is not a valid event");
            WebhookError::Parse(e)
        })?;

        tracing::debug!(
            event_id = %event.id,
            event_type = %event.event_type,
            "Webhook event verified"
        );

        Ok(event)
    }
}

/// Verifier bound to one signing secret.
pub struct WebhookVerifier {
    secret: SecretString,
    tolerance_secs: u64,
}

impl WebhookVerifier {
    /// Creates a verifier with the default 300 second tolerance.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Overrides the tolerance; 0 disables the timestamp check.
    pub fn with_tolerance(mut self, tolerance_secs: u64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Builds a verifier from the client configuration.
    ///
    /// # Errors
    ///
    /// `MissingSecret` if no webhook secret is configured.
    pub fn from_config(config: &StripeConfig) -> Result<Self, WebhookError> {
        let secret = config
            .webhook_secret
            .as_ref()
            .ok_or(WebhookError::MissingSecret)?;

        Ok(Self {
            secret: SecretString::new(secret.expose_secret().clone()),
            tolerance_secs: config.webhook_tolerance_secs,
        })
    }

    pub fn tolerance_secs(&self) -> u64 {
        self.tolerance_secs
    }

    /// Checks the signature without decoding the payload.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), SignatureError> {
        verify_header(
            payload,
            signature_header,
            self.secret.expose_secret(),
            self.tolerance_secs,
        )
    }

    /// Verifies and decodes the delivery.
    pub fn construct_event(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<Event, WebhookError> {
        Webhook::construct_event(
            payload,
            signature_header,
            self.secret.expose_secret(),
            self.tolerance_secs,
        )
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";

    fn event_payload() -> Vec<u8> {
        serde_json::json!({
            "id": "evt_test_webhook",
            "object": "event",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "livemode": false,
            "data": {
                "object": {
                    "id": "cs_test_123",
                    "object": "checkout.session",
                    "mode": "subscription",
                    "customer": "cus_1"
                }
            }
        })
        .to_string()
        .into_bytes()
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    // ══════════════════════════════════════════════════════════════
    // construct_event
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn construct_event_returns_verified_event() {
        let payload = event_payload();
        let header = generate_test_header(&payload, TEST_SECRET, now());

        let event = Webhook::construct_event(&payload, &header, TEST_SECRET, 300).unwrap();

        assert_eq!(event.id, "evt_test_webhook");
        assert_eq!(event.event_type, "checkout.session.completed");
        assert_eq!(event.customer_id(), Some("cus_1"));
    }

    #[test]
    fn construct_event_rejects_bad_signature() {
        let payload = event_payload();
        let header = generate_test_header(&payload, "whsec_wrong", now());

        let result = Webhook::construct_event(&payload, &header, TEST_SECRET, 300);

        assert!(matches!(
            result,
            Err(WebhookError::Signature(SignatureError::NoMatchingSignature))
        ));
    }

    #[test]
    fn construct_event_rejects_authentic_non_event() {
        let payload = br#"{"hello":"world"}"#;
        let header = generate_test_header(payload, TEST_SECRET, now());

        let result = Webhook::construct_event(payload, &header, TEST_SECRET, 300);

        assert!(matches!(result, Err(WebhookError::Parse(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // WebhookVerifier
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verifier_verifies_and_decodes() {
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let payload = event_payload();
        let header = generate_test_header(&payload, TEST_SECRET, now());

        assert!(verifier.verify(&payload, &header).is_ok());
        assert!(verifier.construct_event(&payload, &header).is_ok());
    }

    #[test]
    fn verifier_zero_tolerance_accepts_old_delivery() {
        let verifier = WebhookVerifier::new(TEST_SECRET).with_tolerance(0);
        let payload = event_payload();
        let header = generate_test_header(&payload, TEST_SECRET, 1_000_000);

        assert!(verifier.verify(&payload, &header).is_ok());
    }

    #[test]
    fn verifier_default_tolerance_rejects_old_delivery() {
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let payload = event_payload();
        let header = generate_test_header(&payload, TEST_SECRET, now() - 3600);

        assert!(matches!(
            verifier.verify(&payload, &header),
            Err(SignatureError::StaleTimestamp { .. })
        ));
    }

    #[test]
    fn verifier_from_config_requires_secret() {
        let config = StripeConfig::new("sk_test_abc");
        assert!(matches!(
            WebhookVerifier::from_config(&config),
            Err(WebhookError::MissingSecret)
        ));
    }

    #[test]
    fn verifier_from_config_uses_configured_values() {
        let config = StripeConfig::new("sk_test_abc")
            .with_webhook_secret(TEST_SECRET)
            .with_webhook_tolerance(60);

        let verifier = WebhookVerifier::from_config(&config).unwrap();

        assert_eq!(verifier.tolerance_secs(), 60);
    }

    #[test]
    fn verifier_debug_redacts_secret() {
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let debug = format!("{:?}", verifier);
        assert!(!debug.contains(TEST_SECRET));
    }
}
