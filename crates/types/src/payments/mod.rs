//! Payment intent domain model and lifecycle state machine.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub mod errors;
pub mod request;
pub mod response;

pub use errors::PaymentError;
pub use request::CreatePaymentIntentRequest;
pub use response::{PaymentIntentResponse, PaymentStatusResponse, TransitionResponse};

use crate::adapters::TxId;
use crate::constants::limits::BLOCK_TIME_SECONDS;

/// Result type for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Opaque 16-byte payment intent identifier, hex-encoded on the wire.
///
/// Generated from a v4 UUID at creation, so collisions are negligible for
/// the lifetime of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentId([u8; 16]);

impl PaymentId {
	/// Generate a fresh random identifier.
	pub fn generate() -> Self {
		Self(*uuid::Uuid::new_v4().as_bytes())
	}

	/// Raw identifier bytes, as passed to the settlement contract.
	pub fn as_bytes(&self) -> &[u8; 16] {
		&self.0
	}

	/// Parse a hex-encoded identifier as it appears in URLs and JSON.
	pub fn from_hex(s: &str) -> PaymentResult<Self> {
		let bytes = hex::decode(s).map_err(|_| PaymentError::InvalidId(s.to_string()))?;
		let bytes: [u8; 16] = bytes
			.try_into()
			.map_err(|_| PaymentError::InvalidId(s.to_string()))?;
		Ok(Self(bytes))
	}
}

impl fmt::Display for PaymentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", hex::encode(self.0))
	}
}

impl FromStr for PaymentId {
	type Err = PaymentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_hex(s)
	}
}

impl Serialize for PaymentId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for PaymentId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Self::from_hex(&s).map_err(serde::de::Error::custom)
	}
}

/// Settlement rail requested for a payment intent.
///
/// The method determines expected settlement latency, not correctness: only
/// sBTC is wired to the settlement contract today, the rest are explicit
/// capability gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum PaymentMethod {
	/// sBTC on the Stacks layer (method 1).
	Sbtc,
	/// Lightning Network channel payment (method 2).
	Lightning,
	/// Native Bitcoin L1 transaction (method 3).
	BitcoinL1,
	/// Liquid side-chain transaction (method 4).
	Liquid,
}

impl PaymentMethod {
	/// Wire representation used by the contract and the HTTP API.
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Sbtc => 1,
			Self::Lightning => 2,
			Self::BitcoinL1 => 3,
			Self::Liquid => 4,
		}
	}
}

impl TryFrom<u8> for PaymentMethod {
	type Error = PaymentError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(Self::Sbtc),
			2 => Ok(Self::Lightning),
			3 => Ok(Self::BitcoinL1),
			4 => Ok(Self::Liquid),
			other => Err(PaymentError::InvalidMethod(other)),
		}
	}
}

impl Serialize for PaymentMethod {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u8(self.as_u8())
	}
}

impl<'de> Deserialize<'de> for PaymentMethod {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = u8::deserialize(deserializer)?;
		Self::try_from(value).map_err(serde::de::Error::custom)
	}
}

/// Lifecycle state of a payment intent.
///
/// Legal transitions:
///
/// ```text
/// PENDING ──▶ CONFIRMED ──▶ COMPLETED
///    │             │
///    ├──▶ CANCELLED├──▶ FAILED
///    └──────────────────▶ EXPIRED (any non-terminal, once expires_at passes)
/// ```
///
/// Terminal states have no outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum PaymentStatus {
	Pending,
	Confirmed,
	Completed,
	Cancelled,
	Failed,
	Expired,
	/// Reported when the ledger returns a status code this layer does not
	/// recognize.
	Unknown,
}

impl PaymentStatus {
	/// Map a contract status code to a domain status.
	///
	/// Codes 0–4 are defined by the contract; anything else is `Unknown`.
	pub fn from_code(code: u8) -> Self {
		match code {
			0 => Self::Pending,
			1 => Self::Confirmed,
			2 => Self::Completed,
			3 => Self::Failed,
			4 => Self::Expired,
			_ => Self::Unknown,
		}
	}

	/// Whether this state admits no further transitions.
	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			Self::Completed | Self::Cancelled | Self::Failed | Self::Expired
		)
	}

	/// Whether moving from `self` to `next` is a legal lifecycle transition.
	pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
		match (self, next) {
			(Self::Pending, Self::Confirmed)
			| (Self::Pending, Self::Cancelled)
			| (Self::Pending, Self::Failed)
			| (Self::Confirmed, Self::Completed)
			| (Self::Confirmed, Self::Failed) => true,
			(from, Self::Expired) => !from.is_terminal(),
			_ => false,
		}
	}

	/// Wire string, matching the JSON representation.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Confirmed => "confirmed",
			Self::Completed => "completed",
			Self::Cancelled => "cancelled",
			Self::Failed => "failed",
			Self::Expired => "expired",
			Self::Unknown => "unknown",
		}
	}
}

impl fmt::Display for PaymentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A request to move funds from payer to merchant, tracked through its
/// lifecycle until settled or terminated.
///
/// The external ledger is the system of record; instances of this struct are
/// request-scoped views, never a durable store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
	pub id: PaymentId,
	pub merchant: String,
	/// Amount in the smallest currency unit.
	pub amount: u64,
	pub currency: String,
	pub method: PaymentMethod,
	pub status: PaymentStatus,
	/// Free-form key-value mapping, opaque to the gateway.
	#[serde(default)]
	pub metadata: HashMap<String, serde_json::Value>,
	pub created_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
	/// Settlement transaction reference from intent creation, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tx_id: Option<TxId>,
}

impl PaymentIntent {
	/// Create a fresh `PENDING` intent with a generated id.
	///
	/// `expires_in_blocks` is converted to wall-clock time at ~10 minutes
	/// per block.
	pub fn new(
		merchant: String,
		amount: u64,
		currency: String,
		method: PaymentMethod,
		expires_in_blocks: u32,
		metadata: HashMap<String, serde_json::Value>,
	) -> Self {
		let created_at = Utc::now();
		let expires_at =
			created_at + Duration::seconds(expires_in_blocks as i64 * BLOCK_TIME_SECONDS as i64);
		Self {
			id: PaymentId::generate(),
			merchant,
			amount,
			currency,
			method,
			status: PaymentStatus::Pending,
			metadata,
			created_at,
			expires_at,
			tx_id: None,
		}
	}

	/// Whether the intent's expiry has passed at `now`.
	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		now > self.expires_at
	}

	/// Status adjusted for wall-clock expiry: a non-terminal intent past its
	/// expiry reads as `Expired`.
	pub fn effective_status(&self, now: DateTime<Utc>) -> PaymentStatus {
		if !self.status.is_terminal() && self.is_expired_at(now) {
			PaymentStatus::Expired
		} else {
			self.status
		}
	}
}

/// Outcome of a lifecycle transition confirmed by the settlement layer.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionReceipt {
	pub payment_id: PaymentId,
	pub status: PaymentStatus,
	pub tx_id: TxId,
	pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn payment_id_hex_round_trip() {
		let id = PaymentId::generate();
		let parsed = PaymentId::from_hex(&id.to_string()).unwrap();
		assert_eq!(id, parsed);
		assert_eq!(id.to_string().len(), 32);
	}

	#[test]
	fn payment_id_rejects_bad_input() {
		assert!(PaymentId::from_hex("not-hex").is_err());
		assert!(PaymentId::from_hex("abcd").is_err()); // too short
		assert!(PaymentId::from_hex(&"00".repeat(17)).is_err()); // too long
	}

	#[test]
	fn method_codes_round_trip() {
		for code in 1..=4u8 {
			let method = PaymentMethod::try_from(code).unwrap();
			assert_eq!(method.as_u8(), code);
		}
		assert!(PaymentMethod::try_from(0).is_err());
		assert!(PaymentMethod::try_from(5).is_err());
	}

	#[test]
	fn status_code_mapping() {
		assert_eq!(PaymentStatus::from_code(0), PaymentStatus::Pending);
		assert_eq!(PaymentStatus::from_code(1), PaymentStatus::Confirmed);
		assert_eq!(PaymentStatus::from_code(2), PaymentStatus::Completed);
		assert_eq!(PaymentStatus::from_code(3), PaymentStatus::Failed);
		assert_eq!(PaymentStatus::from_code(4), PaymentStatus::Expired);
		assert_eq!(PaymentStatus::from_code(99), PaymentStatus::Unknown);
	}

	#[test]
	fn pending_transitions() {
		use PaymentStatus::*;
		assert!(Pending.can_transition_to(Confirmed));
		assert!(Pending.can_transition_to(Cancelled));
		assert!(Pending.can_transition_to(Failed));
		assert!(Pending.can_transition_to(Expired));
		assert!(!Pending.can_transition_to(Completed));
	}

	#[test]
	fn confirmed_transitions() {
		use PaymentStatus::*;
		assert!(Confirmed.can_transition_to(Completed));
		assert!(Confirmed.can_transition_to(Failed));
		assert!(Confirmed.can_transition_to(Expired));
		assert!(!Confirmed.can_transition_to(Cancelled));
		assert!(!Confirmed.can_transition_to(Pending));
	}

	#[test]
	fn terminal_states_admit_nothing() {
		use PaymentStatus::*;
		for terminal in [Completed, Cancelled, Failed, Expired] {
			for next in [Pending, Confirmed, Completed, Cancelled, Failed, Expired] {
				assert!(
					!terminal.can_transition_to(next),
					"{terminal} -> {next} must be illegal"
				);
			}
		}
	}

	#[test]
	fn expiry_is_blocks_times_ten_minutes() {
		let intent = PaymentIntent::new(
			"M1".into(),
			100_000,
			"BTC".into(),
			PaymentMethod::Sbtc,
			144,
			HashMap::new(),
		);
		let expected = intent.created_at + Duration::hours(24);
		assert_eq!(intent.expires_at, expected);
		assert_eq!(intent.status, PaymentStatus::Pending);
	}

	#[test]
	fn effective_status_reports_expiry() {
		let mut intent = PaymentIntent::new(
			"M1".into(),
			100_000,
			"BTC".into(),
			PaymentMethod::Sbtc,
			1,
			HashMap::new(),
		);
		let later = intent.expires_at + Duration::seconds(1);
		assert_eq!(intent.effective_status(later), PaymentStatus::Expired);

		// A terminal status is never rewritten by expiry.
		intent.status = PaymentStatus::Completed;
		assert_eq!(intent.effective_status(later), PaymentStatus::Completed);
	}
}
