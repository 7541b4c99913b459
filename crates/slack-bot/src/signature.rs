//! Slack request signature verification.
//!
//! Slack signs every Events API request with
//! `HMAC-SHA256(signing_secret, "v0:" + timestamp + ":" + body)` and sends the
//! hex digest as `v0=<hex>`. The digest covers the raw body bytes exactly as
//! received, so verification must run before the payload is parsed.

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::time::Duration;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request timestamp (Unix seconds).
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Header carrying the `v0=<hex>` signature.
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

const SIGNATURE_VERSION: &str = "v0";

/// Reasons a request fails authentication.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing header {0}")]
    MissingHeader(&'static str),

    #[error("invalid timestamp")]
    InvalidTimestamp,

    #[error("timestamp outside the allowed window")]
    Expired,

    #[error("malformed signature")]
    Malformed,

    #[error("signature mismatch")]
    Mismatch,
}

/// Verifies inbound requests against the shared signing secret.
pub struct SignatureVerifier {
    secret: SecretString,
    max_age: Option<Duration>,
}

impl SignatureVerifier {
    /// Create a verifier. A zero `max_age` disables the replay window.
    pub fn new(secret: impl Into<String>, max_age: Duration) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            max_age: (!max_age.is_zero()).then_some(max_age),
        }
    }

    /// Verify a request against the current wall clock.
    pub fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), SignatureError> {
        self.verify_at(headers, body, chrono::Utc::now().timestamp())
    }

    /// Verify a request as if the current time were `now` (Unix seconds).
    pub fn verify_at(
        &self,
        headers: &HeaderMap,
        body: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let timestamp = header_value(headers, TIMESTAMP_HEADER)?;
        let signature = header_value(headers, SIGNATURE_HEADER)?;

        let sent_at: i64 = timestamp
            .parse()
            .map_err(|_| SignatureError::InvalidTimestamp)?;

        if let Some(max_age) = self.max_age {
            if now.abs_diff(sent_at) > max_age.as_secs() {
                return Err(SignatureError::Expired);
            }
        }

        let provided = signature
            .strip_prefix(SIGNATURE_VERSION)
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or(SignatureError::Malformed)?;
        let provided = hex::decode(provided).map_err(|_| SignatureError::Malformed)?;

        // verify_slice compares in constant time
        self.mac(timestamp, body)
            .verify_slice(&provided)
            .map_err(|_| SignatureError::Mismatch)
    }

    /// Compute the `v0=<hex>` signature Slack would send for this request.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> String {
        let digest = self.mac(timestamp, body).finalize().into_bytes();
        format!("{}={}", SIGNATURE_VERSION, hex::encode(digest))
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(SIGNATURE_VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        mac
    }
}

fn header_value<'a>(
    headers: &'a HeaderMap,
    name: &'static str,
) -> Result<&'a str, SignatureError> {
    let value = headers.get(name).ok_or(SignatureError::MissingHeader(name))?;
    value.to_str().map_err(|_| SignatureError::Malformed)
}
