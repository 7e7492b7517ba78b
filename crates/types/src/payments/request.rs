//! Payment intent request DTOs.
//!
//! Fields are optional so that presence checks surface as itemized
//! validation violations rather than deserialization failures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Body of `POST /payments/intents`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreatePaymentIntentRequest {
	pub merchant: Option<String>,
	/// Amount in the smallest currency unit.
	pub amount: Option<i64>,
	pub currency: Option<String>,
	/// Settlement method code, 1–4.
	pub method: Option<i64>,
	/// Expiry in blocks, 1–1008. Defaults to 144 (~24 hours).
	pub expires_in_blocks: Option<i64>,
	#[serde(default)]
	pub metadata: Option<HashMap<String, serde_json::Value>>,
}
