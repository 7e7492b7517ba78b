//! Payment intent response DTOs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::{PaymentIntent, TransitionReceipt};

/// Wire shape of a payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PaymentIntentResponse {
	/// Hex-encoded 16-byte identifier.
	pub id: String,
	pub merchant: String,
	pub amount: u64,
	pub currency: String,
	pub method: u8,
	pub status: String,
	#[serde(default)]
	pub metadata: HashMap<String, serde_json::Value>,
	pub created_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tx_id: Option<String>,
}

impl From<&PaymentIntent> for PaymentIntentResponse {
	fn from(intent: &PaymentIntent) -> Self {
		Self {
			id: intent.id.to_string(),
			merchant: intent.merchant.clone(),
			amount: intent.amount,
			currency: intent.currency.clone(),
			method: intent.method.as_u8(),
			status: intent.status.to_string(),
			metadata: intent.metadata.clone(),
			created_at: intent.created_at,
			expires_at: intent.expires_at,
			tx_id: intent.tx_id.as_ref().map(|tx| tx.to_string()),
		}
	}
}

/// Wire shape of a confirmed lifecycle transition.
///
/// The timestamp field is named per operation (`processed_at`,
/// `completed_at`, `cancelled_at`) by the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TransitionResponse {
	pub payment_id: String,
	pub status: String,
	pub tx_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub processed_at: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub completed_at: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cancelled_at: Option<DateTime<Utc>>,
}

impl TransitionResponse {
	fn base(receipt: &TransitionReceipt) -> Self {
		Self {
			payment_id: receipt.payment_id.to_string(),
			status: receipt.status.to_string(),
			tx_id: receipt.tx_id.to_string(),
			processed_at: None,
			completed_at: None,
			cancelled_at: None,
		}
	}

	pub fn processed(receipt: &TransitionReceipt) -> Self {
		Self {
			processed_at: Some(receipt.occurred_at),
			..Self::base(receipt)
		}
	}

	pub fn completed(receipt: &TransitionReceipt) -> Self {
		Self {
			completed_at: Some(receipt.occurred_at),
			..Self::base(receipt)
		}
	}

	pub fn cancelled(receipt: &TransitionReceipt) -> Self {
		Self {
			cancelled_at: Some(receipt.occurred_at),
			..Self::base(receipt)
		}
	}
}

/// Wire shape of `GET /payments/intents/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PaymentStatusResponse {
	pub payment_id: String,
	pub status: String,
	pub checked_at: DateTime<Utc>,
}
