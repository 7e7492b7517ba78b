//! Lightning Network models: invoices, payments, HTLC locks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub mod errors;

pub use errors::LightningError;

use crate::payments::PaymentId;

/// Result type for lightning operations
pub type LightningResult<T> = Result<T, LightningError>;

/// Parameters for creating an invoice on the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceParams {
	pub amount_msat: u64,
	pub description: String,
	/// Invoice lifetime in seconds.
	pub expiry_secs: u64,
}

/// A BOLT11-style invoice as returned by the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
	pub payment_request: String,
	/// Hex-encoded 32-byte payment hash.
	pub payment_hash: String,
	pub amount_msat: u64,
	pub description: String,
	pub expiry_secs: u64,
	pub created_at: DateTime<Utc>,
}

/// Settlement state of an outgoing lightning payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum LightningPaymentStatus {
	Pending,
	Succeeded,
	Failed,
}

/// An outgoing lightning payment tracked by hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightningPayment {
	pub payment_hash: String,
	/// Revealed on success.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payment_preimage: Option<String>,
	pub amount_msat: u64,
	pub fee_msat: u64,
	pub status: LightningPaymentStatus,
	pub created_at: DateTime<Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub settled_at: Option<DateTime<Utc>>,
}

/// A freshly generated HTLC preimage and its SHA-256 hash, both hex.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PreimagePair {
	pub preimage: String,
	pub hash: String,
}

/// A validated on-contract HTLC lock for the Lightning settlement leg.
///
/// Funds stay locked until the preimage is revealed or the timelock elapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtlcLock {
	pub payment_id: PaymentId,
	pub amount: u64,
	/// Hex-encoded 32-byte SHA-256 of the preimage.
	pub preimage_hash: String,
	/// Unix-millisecond deadline after which the lock is refundable.
	pub timelock: i64,
	pub recipient: String,
}

/// Body of `POST /lightning/lock`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HtlcLockRequest {
	pub payment_id: Option<String>,
	pub amount: Option<i64>,
	pub preimage_hash: Option<String>,
	/// Defaults to one hour from now.
	pub timelock: Option<i64>,
	pub recipient: Option<String>,
}

/// Body of `POST /lightning/claim`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HtlcClaimRequest {
	pub preimage: Option<String>,
}

/// Body of `POST /lightning/refund`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HtlcRefundRequest {
	pub preimage_hash: Option<String>,
}

/// Body of `POST /lightning/invoices`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateInvoiceRequest {
	pub amount_sats: Option<i64>,
	pub description: Option<String>,
	/// Invoice lifetime in seconds, defaults to 3600.
	pub expiry: Option<i64>,
}

/// Body of `POST /lightning/invoices/decode`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DecodeInvoiceRequest {
	pub payment_request: Option<String>,
}

/// Body of `POST /lightning/payments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PayInvoiceRequest {
	pub payment_request: Option<String>,
	pub amount_sats: Option<i64>,
}

/// Body of `POST /lightning/submarine-swaps`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SubmarineSwapRequest {
	pub amount_sats: Option<i64>,
	pub swap_hash: Option<String>,
	/// Defaults to 144 blocks (~24 hours).
	pub expiry_blocks: Option<i64>,
}
