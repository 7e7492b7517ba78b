//! Merchant response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::{Merchant, MultiSigTransaction, Subscription, YieldPosition};

/// Wire shape of a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RegisterMerchantResponse {
	pub merchant: String,
	pub fee_destination: String,
	pub yield_enabled: bool,
	pub yield_percentage: u64,
	pub multi_sig_enabled: bool,
	pub required_signatures: u64,
	pub tx_id: String,
	pub registered_at: DateTime<Utc>,
}

impl From<&Merchant> for RegisterMerchantResponse {
	fn from(merchant: &Merchant) -> Self {
		Self {
			merchant: merchant.merchant.clone(),
			fee_destination: merchant.registration.fee_destination.clone(),
			yield_enabled: merchant.registration.yield_enabled,
			yield_percentage: merchant.registration.yield_percentage,
			multi_sig_enabled: merchant.registration.multi_sig_enabled,
			required_signatures: merchant.registration.required_signatures,
			tx_id: merchant
				.tx_id
				.as_ref()
				.map(|tx| tx.to_string())
				.unwrap_or_default(),
			registered_at: merchant.registered_at,
		}
	}
}

/// Wire shape of `GET /merchants/{address}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MerchantInfoResponse {
	pub merchant: String,
	pub registered: bool,
	pub checked_at: DateTime<Utc>,
}

/// Wire shape of `GET /merchants/check/{address}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MerchantCheckResponse {
	pub address: String,
	pub registered: bool,
	pub checked_at: DateTime<Utc>,
}

/// Wire shape of `GET /merchants/stats/{address}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MerchantStatsResponse {
	pub merchant: String,
	pub total_volume: u64,
	pub active_payments: u64,
	pub success_rate: u64,
	pub yield_earned: u64,
}

/// Wire shape of a created subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SubscriptionResponse {
	pub subscription_id: String,
	pub merchant: String,
	pub customer: String,
	pub amount: u64,
	pub interval_blocks: u32,
	pub next_payment: DateTime<Utc>,
	pub active: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tx_id: Option<String>,
	pub created_at: DateTime<Utc>,
}

impl From<&Subscription> for SubscriptionResponse {
	fn from(sub: &Subscription) -> Self {
		Self {
			subscription_id: sub.subscription_id.clone(),
			merchant: sub.merchant.clone(),
			customer: sub.customer.clone(),
			amount: sub.amount,
			interval_blocks: sub.interval_blocks,
			next_payment: sub.next_payment,
			active: sub.active,
			tx_id: sub.tx_id.as_ref().map(|tx| tx.to_string()),
			created_at: sub.created_at,
		}
	}
}

/// Wire shape of a created yield position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct YieldPositionResponse {
	pub position_id: String,
	pub merchant: String,
	pub amount: u64,
	pub strategy: String,
	pub duration_blocks: u32,
	pub expected_apy: String,
	pub status: String,
	pub created_at: DateTime<Utc>,
}

impl From<&YieldPosition> for YieldPositionResponse {
	fn from(position: &YieldPosition) -> Self {
		Self {
			position_id: position.position_id.clone(),
			merchant: position.merchant.clone(),
			amount: position.amount,
			strategy: position.strategy.clone(),
			duration_blocks: position.duration_blocks,
			expected_apy: position.expected_apy.clone(),
			status: position.status.clone(),
			created_at: position.created_at,
		}
	}
}

/// Wire shape of `GET /merchants/yield`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct YieldSummaryResponse {
	pub merchant: String,
	pub total_deposited: u64,
	pub yield_earned: u64,
	pub last_compound: DateTime<Utc>,
	pub estimated_apy: String,
}

/// Wire shape of `GET /merchants/yield/estimate/{amount}/{duration}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct YieldEstimateResponse {
	pub amount: u64,
	pub duration_blocks: u64,
	pub estimated_yield: u64,
	pub apy: String,
}

/// Wire shape of a multi-sig transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MultiSigTxResponse {
	pub tx_id: String,
	pub merchant: String,
	pub amount: u64,
	pub destination: String,
	pub signatures: Vec<String>,
	pub executed: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contract_tx_id: Option<String>,
	pub created_at: DateTime<Utc>,
}

impl From<&MultiSigTransaction> for MultiSigTxResponse {
	fn from(tx: &MultiSigTransaction) -> Self {
		Self {
			tx_id: tx.tx_id.clone(),
			merchant: tx.merchant.clone(),
			amount: tx.amount,
			destination: tx.destination.clone(),
			signatures: tx.signatures.clone(),
			executed: tx.executed,
			contract_tx_id: tx.contract_tx_id.as_ref().map(|tx| tx.to_string()),
			created_at: tx.created_at,
		}
	}
}
