//! Merchant domain models: registration, subscriptions, yield, multi-sig.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod request;
pub mod response;

pub use errors::MerchantError;
pub use request::{
	CreateMultiSigTxRequest, CreateSubscriptionRequest, CreateYieldPositionRequest,
	RegisterMerchantRequest,
};
pub use response::{
	MerchantCheckResponse, MerchantInfoResponse, MerchantStatsResponse, MultiSigTxResponse,
	RegisterMerchantResponse, SubscriptionResponse, YieldEstimateResponse, YieldPositionResponse,
	YieldSummaryResponse,
};

use crate::adapters::TxId;
use crate::constants::limits::BLOCK_TIME_SECONDS;
use crate::models::ids;

/// Result type for merchant operations
pub type MerchantResult<T> = Result<T, MerchantError>;

/// Validated merchant registration parameters, as sent to the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantRegistration {
	/// Address receiving settled funds.
	pub fee_destination: String,
	pub yield_enabled: bool,
	/// Yield share in basis points, required when `yield_enabled`.
	pub yield_percentage: u64,
	pub multi_sig_enabled: bool,
	/// Signatures required to move funds, required when `multi_sig_enabled`.
	pub required_signatures: u64,
}

/// A registered merchant as known to this layer.
///
/// Registration happens exactly once per identity; the ledger enforces the
/// idempotency boundary, this layer only pre-checks to fail politely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
	/// Merchant identity (the API key identity in this deployment).
	pub merchant: String,
	#[serde(flatten)]
	pub registration: MerchantRegistration,
	pub registered_at: DateTime<Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tx_id: Option<TxId>,
}

/// A recurring payment agreement between a merchant and a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
	/// Hex-encoded 16-byte identifier.
	pub subscription_id: String,
	pub merchant: String,
	pub customer: String,
	pub amount: u64,
	pub interval_blocks: u32,
	pub next_payment: DateTime<Utc>,
	pub active: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tx_id: Option<TxId>,
	pub created_at: DateTime<Utc>,
}

impl Subscription {
	/// Create an active subscription with a generated id and the first
	/// billing point one interval out.
	pub fn new(merchant: String, customer: String, amount: u64, interval_blocks: u32) -> Self {
		let created_at = Utc::now();
		let next_payment =
			created_at + Duration::seconds(interval_blocks as i64 * BLOCK_TIME_SECONDS as i64);
		Self {
			subscription_id: ids::hex_id_16(),
			merchant,
			customer,
			amount,
			interval_blocks,
			next_payment,
			active: true,
			tx_id: None,
			created_at,
		}
	}
}

/// A merchant's yield deployment of settled funds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldPosition {
	/// Hex-encoded 16-byte identifier.
	pub position_id: String,
	pub merchant: String,
	pub amount: u64,
	pub strategy: String,
	pub duration_blocks: u32,
	pub expected_apy: String,
	pub status: String,
	pub created_at: DateTime<Utc>,
}

/// A pending multi-signature spend proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiSigTransaction {
	/// Hex-encoded 32-byte identifier.
	pub tx_id: String,
	pub merchant: String,
	pub amount: u64,
	pub destination: String,
	pub signatures: Vec<String>,
	pub executed: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contract_tx_id: Option<TxId>,
	pub created_at: DateTime<Utc>,
}

impl MultiSigTransaction {
	/// Create a proposal carrying the proposer's signature.
	pub fn new(merchant: String, amount: u64, destination: String) -> Self {
		Self {
			tx_id: ids::hex_id_32(),
			signatures: vec![merchant.clone()],
			merchant,
			amount,
			destination,
			executed: false,
			contract_tx_id: None,
			created_at: Utc::now(),
		}
	}
}

/// Aggregate merchant statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantStats {
	pub merchant: String,
	pub total_volume: u64,
	pub active_payments: u64,
	pub success_rate: u64,
	pub yield_earned: u64,
}
