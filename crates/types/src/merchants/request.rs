//! Merchant request DTOs.

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Body of `POST /merchants/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RegisterMerchantRequest {
	pub fee_destination: Option<String>,
	pub yield_enabled: Option<bool>,
	/// Basis points, 0–10000. Required when `yield_enabled`.
	pub yield_percentage: Option<i64>,
	pub multi_sig_enabled: Option<bool>,
	/// 1–5. Required when `multi_sig_enabled`.
	pub required_signatures: Option<i64>,
}

/// Body of `POST /merchants/subscriptions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateSubscriptionRequest {
	pub customer: Option<String>,
	pub amount: Option<i64>,
	/// Billing interval in blocks. Defaults to 144 (~daily).
	pub interval_blocks: Option<i64>,
}

/// Body of `POST /merchants/yield-positions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateYieldPositionRequest {
	pub merchant: Option<String>,
	pub amount: Option<i64>,
	/// Defaults to "STACKING".
	pub strategy: Option<String>,
	/// Defaults to 2016 (~2 weeks).
	pub duration_blocks: Option<i64>,
}

/// Body of `POST /merchants/multisig/transactions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateMultiSigTxRequest {
	pub amount: Option<i64>,
	pub destination: Option<String>,
}
