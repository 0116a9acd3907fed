//! Stripe webhook signature verification.
//!
//! Stripe signs each delivery with HMAC-SHA256 over `"{t}.{payload}"` and sends
//! the result in the `Stripe-Signature` header:
//!
//! ```text
//! t=1704067200,v1=5257a869e7ecebeda32affa62cdca3fa51cad7e77a0e56ff536d0ce8e108d8bd,v0=...
//! ```
//!
//! During secret rotation the header may carry several `v1` entries; any one
//! matching is enough. Entries for other schemes (`v0`, future `v2`) are
//! ignored.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};

use super::errors::SignatureError;

type HmacSha256 = Hmac<Sha256>;

/// Default replay window (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Scheme tag of the signatures this client checks.
pub const SIGNATURE_SCHEME: &str = "v1";

const TIMESTAMP_KEY: &str = "t";

/// Parsed `Stripe-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when Stripe signed the payload.
    pub timestamp: i64,

    /// Timestamp exactly as sent; this is what was signed.
    raw_timestamp: String,

    /// Hex-encoded `v1` signatures, in header order.
    pub signatures: Vec<String>,
}

impl SignatureHeader {
    /// Parses a header of comma-separated `key=value` pairs.
    ///
    /// Pairs without `=` and keys other than `t` and `v1` are skipped. A header
    /// with no `v1` entries parses fine and simply never matches.
    ///
    /// # Errors
    ///
    /// `HeaderParse` if the timestamp is missing or not an integer.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut raw_timestamp: Option<&str> = None;
        let mut signatures = Vec::new();

        for pair in header.split(',') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            if key == TIMESTAMP_KEY {
                raw_timestamp = Some(value);
            } else if key == SIGNATURE_SCHEME {
                signatures.push(value.to_string());
            }
        }

        let raw_timestamp = raw_timestamp
            .ok_or_else(|| SignatureError::HeaderParse("missing timestamp".to_string()))?;
        let timestamp = raw_timestamp.parse::<i64>().map_err(|_| {
            SignatureError::HeaderParse(format!("invalid timestamp: {}", raw_timestamp))
        })?;

        Ok(Self {
            timestamp,
            raw_timestamp: raw_timestamp.to_string(),
            signatures,
        })
    }

    /// Returns true if any candidate equals the expected MAC.
    ///
    /// Every candidate is compared so the time taken does not depend on which
    /// one matched. Candidates that are not valid hex never match.
    fn matches(&self, expected: &[u8]) -> bool {
        let mut matched = Choice::from(0u8);
        for candidate in &self.signatures {
            if let Ok(bytes) = hex::decode(candidate) {
                matched |= expected.ct_eq(&bytes);
            }
        }
        matched.into()
    }
}

/// Verifies `header` against `payload` using the current system time.
///
/// `tolerance_secs` of 0 disables the timestamp check.
///
/// # Errors
///
/// - `HeaderParse` - timestamp missing or malformed
/// - `NoMatchingSignature` - no `v1` signature matches
/// - `StaleTimestamp` - signed too long ago, or too far in the future
pub fn verify_header(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: u64,
) -> Result<(), SignatureError> {
    verify_header_at(
        payload,
        header,
        secret,
        tolerance_secs,
        chrono::Utc::now().timestamp(),
    )
}

/// Same as [`verify_header`] with an explicit current time.
pub fn verify_header_at(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: u64,
    now: i64,
) -> Result<(), SignatureError> {
    let parsed = SignatureHeader::parse(header)?;

    let expected = compute_signature(secret, &parsed.raw_timestamp, payload);
    if !parsed.matches(&expected) {
        return Err(SignatureError::NoMatchingSignature);
    }

    if tolerance_secs > 0 && now.abs_diff(parsed.timestamp) > tolerance_secs {
        return Err(SignatureError::StaleTimestamp {
            timestamp: parsed.timestamp,
            now,
            tolerance_secs,
        });
    }

    Ok(())
}

/// HMAC-SHA256 of `"{timestamp}.{payload}"` keyed by `secret`.
fn compute_signature(secret: &str, timestamp: &str, payload: &[u8]) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Builds a valid `Stripe-Signature` header for `payload`.
///
/// Meant for test fixtures that need to simulate a Stripe delivery.
pub fn generate_test_header(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let signature = compute_signature(secret, &timestamp.to_string(), payload);
    format!("t={},{}={}", timestamp, SIGNATURE_SCHEME, hex::encode(signature))
}
