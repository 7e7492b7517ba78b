//! Webhook signature verification using HMAC-SHA256.
//!
//! Incoming webhooks carry `X-Timestamp` and `X-Signature` headers; the
//! signature is HMAC-SHA256 over `timestamp + "." + raw_body` with the
//! shared secret, optionally prefixed with a `v1=` scheme tag. Timestamps
//! outside the replay window are rejected before any signature work.

use std::fmt::Write as _;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use sflow_types::constants::limits::WEBHOOK_TOLERANCE_SECONDS;
use sflow_types::models::secret_string::constant_time_eq;
use sflow_types::SecretString;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum WebhookError {
	#[error("missing webhook signature or timestamp")]
	MissingHeaders,

	#[error("invalid webhook timestamp")]
	InvalidTimestamp,

	#[error("webhook timestamp too old")]
	StaleTimestamp,

	#[error("invalid webhook signature")]
	InvalidSignature,

	#[error("failed to compute signature: {0}")]
	Hmac(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait WebhookVerify: Send + Sync {
	/// Check a signature over `timestamp + "." + body`.
	fn verify(&self, timestamp: &str, signature: &str, body: &[u8]) -> Result<(), WebhookError>;

	/// Compute the hex signature for a payload, for outbound notifications
	/// and tests.
	fn sign(&self, timestamp: &str, body: &[u8]) -> Result<String, WebhookError>;
}

pub struct WebhookVerifier {
	secret: SecretString,
	tolerance_secs: i64,
}

impl WebhookVerifier {
	pub fn new(secret: SecretString) -> Self {
		Self {
			secret,
			tolerance_secs: WEBHOOK_TOLERANCE_SECONDS,
		}
	}

	/// Override the replay window, mainly for tests.
	pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
		self.tolerance_secs = tolerance_secs;
		self
	}

	fn compute(&self, timestamp: &str, body: &[u8]) -> Result<String, WebhookError> {
		let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
			.map_err(|e| WebhookError::Hmac(e.to_string()))?;
		mac.update(timestamp.as_bytes());
		mac.update(b".");
		mac.update(body);

		let digest = mac.finalize().into_bytes();
		let mut hex_string = String::with_capacity(digest.len() * 2);
		for byte in digest {
			write!(&mut hex_string, "{byte:02x}").map_err(|e| WebhookError::Hmac(e.to_string()))?;
		}
		Ok(hex_string)
	}
}

impl WebhookVerify for WebhookVerifier {
	fn verify(&self, timestamp: &str, signature: &str, body: &[u8]) -> Result<(), WebhookError> {
		if timestamp.is_empty() || signature.is_empty() {
			return Err(WebhookError::MissingHeaders);
		}

		let ts: i64 = timestamp
			.parse()
			.map_err(|_| WebhookError::InvalidTimestamp)?;
		if (Utc::now().timestamp() - ts).abs() > self.tolerance_secs {
			return Err(WebhookError::StaleTimestamp);
		}

		let expected = self.compute(timestamp, body)?;
		let received = signature.strip_prefix("v1=").unwrap_or(signature);

		if constant_time_eq(expected.as_bytes(), received.to_lowercase().as_bytes()) {
			Ok(())
		} else {
			Err(WebhookError::InvalidSignature)
		}
	}

	fn sign(&self, timestamp: &str, body: &[u8]) -> Result<String, WebhookError> {
		self.compute(timestamp, body)
	}
}
