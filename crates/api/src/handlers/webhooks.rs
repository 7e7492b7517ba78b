//! Webhook handlers.
//!
//! Webhooks are not bearer-authenticated; they carry `X-Timestamp` and
//! `X-Signature` headers verified over the raw body before the JSON is
//! even parsed.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

fn header<'h>(headers: &'h HeaderMap, name: &str) -> &'h str {
	headers
		.get(name)
		.and_then(|value| value.to_str().ok())
		.unwrap_or("")
}

fn verify(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<(), ApiError> {
	let timestamp = header(headers, "x-timestamp");
	let signature = header(headers, "x-signature");
	state
		.webhooks
		.verify(timestamp, signature, body)
		.map_err(ApiError::from_webhook)
}

/// Payment update pushed by an external monitor.
#[derive(Debug, Deserialize)]
pub struct PaymentUpdate {
	pub payment_id: Option<String>,
	pub status: Option<String>,
	pub transaction_hash: Option<String>,
	pub amount: Option<u64>,
	pub timestamp: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProcessedUpdate {
	pub payment_id: Option<String>,
	pub status: Option<String>,
	pub transaction_hash: Option<String>,
	pub processed_at: DateTime<Utc>,
}

/// POST /webhooks/payment-update - signed payment status notification
pub async fn payment_update(
	State(state): State<AppState>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<ApiResponse<ProcessedUpdate>>, ApiError> {
	verify(&state, &headers, &body)?;

	let update: PaymentUpdate = serde_json::from_slice(&body)
		.map_err(|_| ApiError::bad_request("invalid webhook payload"))?;

	info!(
		payment_id = update.payment_id.as_deref().unwrap_or("-"),
		status = update.status.as_deref().unwrap_or("-"),
		"payment update webhook received"
	);

	Ok(ApiResponse::ok(ProcessedUpdate {
		payment_id: update.payment_id,
		status: update.status,
		transaction_hash: update.transaction_hash,
		processed_at: Utc::now(),
	}))
}

/// Lightning update pushed by an external monitor.
#[derive(Debug, Deserialize)]
pub struct LightningUpdate {
	pub payment_id: Option<String>,
	pub lightning_invoice: Option<String>,
	pub status: Option<String>,
	pub amount_sat: Option<u64>,
	pub timestamp: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LightningAck {
	pub payment_id: Option<String>,
	pub status: Option<String>,
	pub processed_at: DateTime<Utc>,
}

/// POST /webhooks/lightning-update - signed lightning notification
pub async fn lightning_update(
	State(state): State<AppState>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<ApiResponse<LightningAck>>, ApiError> {
	verify(&state, &headers, &body)?;

	let update: LightningUpdate = serde_json::from_slice(&body)
		.map_err(|_| ApiError::bad_request("invalid webhook payload"))?;

	info!(
		payment_id = update.payment_id.as_deref().unwrap_or("-"),
		status = update.status.as_deref().unwrap_or("-"),
		"lightning update webhook received"
	);

	Ok(ApiResponse::ok(LightningAck {
		payment_id: update.payment_id,
		status: update.status,
		processed_at: Utc::now(),
	}))
}

#[derive(Debug, Serialize)]
pub struct WebhookEcho {
	pub received_data: serde_json::Value,
	pub timestamp: DateTime<Utc>,
}

/// POST /webhooks/test - unsigned echo endpoint for integration checks
pub async fn test(body: Bytes) -> Json<ApiResponse<WebhookEcho>> {
	let received_data =
		serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
	ApiResponse::ok(WebhookEcho {
		received_data,
		timestamp: Utc::now(),
	})
}
