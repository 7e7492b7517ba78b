//! Atomic swap and cross-chain exchange models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub mod errors;

pub use errors::SwapError;

use crate::adapters::TxId;
use crate::constants::limits::{BLOCK_TIME_SECONDS, SWAP_EXPIRY_BLOCKS};

/// Result type for swap operations
pub type SwapResult<T> = Result<T, SwapError>;

/// Opaque 32-byte atomic swap identifier, hex-encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapId([u8; 32]);

impl SwapId {
	pub fn generate() -> Self {
		Self(rand::random())
	}

	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}

	pub fn from_hex(s: &str) -> SwapResult<Self> {
		let bytes = hex::decode(s).map_err(|_| SwapError::InvalidId(s.to_string()))?;
		let bytes: [u8; 32] = bytes
			.try_into()
			.map_err(|_| SwapError::InvalidId(s.to_string()))?;
		Ok(Self(bytes))
	}
}

impl fmt::Display for SwapId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", hex::encode(self.0))
	}
}

impl FromStr for SwapId {
	type Err = SwapError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_hex(s)
	}
}

impl Serialize for SwapId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for SwapId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Self::from_hex(&s).map_err(serde::de::Error::custom)
	}
}

/// Contract-side state of an atomic swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum SwapStatus {
	Active,
	Claimed,
	Expired,
}

impl SwapStatus {
	/// Map the contract status code: 1 = active, 2 = claimed, else expired.
	pub fn from_code(code: u8) -> Self {
		match code {
			1 => Self::Active,
			2 => Self::Claimed,
			_ => Self::Expired,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Active => "active",
			Self::Claimed => "claimed",
			Self::Expired => "expired",
		}
	}
}

impl fmt::Display for SwapStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A BTC→Stacks atomic swap: either both legs settle or neither does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomicSwap {
	pub id: SwapId,
	/// Funding transaction on the Bitcoin side, hex txid.
	pub btc_txid: String,
	pub btc_output_index: u32,
	pub amount: u64,
	pub btc_address: String,
	pub recipient: String,
	pub status: SwapStatus,
	pub expires_at: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tx_id: Option<TxId>,
}

impl AtomicSwap {
	/// Create an active swap with a generated id and the standard expiry.
	pub fn new(
		btc_txid: String,
		btc_output_index: u32,
		amount: u64,
		btc_address: String,
		recipient: String,
	) -> Self {
		let created_at = Utc::now();
		let expires_at =
			created_at + Duration::seconds(SWAP_EXPIRY_BLOCKS as i64 * BLOCK_TIME_SECONDS as i64);
		Self {
			id: SwapId::generate(),
			btc_txid,
			btc_output_index,
			amount,
			btc_address,
			recipient,
			status: SwapStatus::Active,
			expires_at,
			created_at,
			tx_id: None,
		}
	}
}

/// Bitcoin-side inclusion proof presented when claiming a swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SwapClaimProof {
	pub txid: String,
	pub tx_hex: String,
	pub merkle_proof: Vec<String>,
}

/// Body of `POST /swaps/atomic`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AtomicSwapRequest {
	pub btc_txid: Option<String>,
	/// Defaults to output 0.
	pub btc_output_index: Option<i64>,
	pub amount: Option<i64>,
	pub btc_address: Option<String>,
	pub recipient: Option<String>,
}

/// Body of `POST /swaps/atomic/{id}/claim`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SwapClaimRequest {
	pub block_hash: Option<String>,
	pub tx_proof: Option<SwapClaimProof>,
}

/// Body of `POST /swaps/quote`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SwapQuoteRequest {
	pub from_currency: Option<String>,
	pub to_currency: Option<String>,
	pub amount: Option<i64>,
	/// Defaults to "atomic".
	pub swap_type: Option<String>,
}

/// A priced cross-chain exchange offer, valid for five minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SwapQuote {
	pub from_currency: String,
	pub to_currency: String,
	pub input_amount: u64,
	pub output_amount: u64,
	pub net_amount: u64,
	pub fee: u64,
	pub exchange_rate: f64,
	pub swap_type: String,
	pub expires_at: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
}

/// Body of `POST /swaps/execute`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ExecuteSwapRequest {
	pub from_currency: Option<String>,
	pub to_currency: Option<String>,
	pub amount: Option<i64>,
	pub recipient_address: Option<String>,
	pub swap_type: Option<String>,
	pub quote_id: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn swap_id_hex_round_trip() {
		let id = SwapId::generate();
		assert_eq!(id, SwapId::from_hex(&id.to_string()).unwrap());
		assert_eq!(id.to_string().len(), 64);
	}

	#[test]
	fn swap_status_codes() {
		assert_eq!(SwapStatus::from_code(1), SwapStatus::Active);
		assert_eq!(SwapStatus::from_code(2), SwapStatus::Claimed);
		assert_eq!(SwapStatus::from_code(0), SwapStatus::Expired);
		assert_eq!(SwapStatus::from_code(7), SwapStatus::Expired);
	}

	#[test]
	fn swap_expiry_is_24_hours() {
		let swap = AtomicSwap::new("aa".repeat(32), 0, 50_000, "bc1q".into(), "ST1".into());
		assert_eq!(swap.expires_at, swap.created_at + Duration::hours(24));
		assert_eq!(swap.status, SwapStatus::Active);
	}
}
