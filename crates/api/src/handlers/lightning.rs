//! Lightning handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use sflow_types::lightning::{
	CreateInvoiceRequest, DecodeInvoiceRequest, HtlcClaimRequest, HtlcLockRequest,
	HtlcRefundRequest, PayInvoiceRequest, PreimagePair, SubmarineSwapRequest,
};

use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

/// Wire shape of a created invoice.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct InvoiceResponse {
	pub payment_request: String,
	pub payment_hash: String,
	pub amount_sats: u64,
	pub description: String,
	pub expires_at: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
}

/// POST /lightning/invoices - create an invoice
pub async fn create_invoice(
	State(state): State<AppState>,
	Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InvoiceResponse>>), ApiError> {
	let invoice = state
		.lightning
		.create_invoice(&request)
		.await
		.map_err(|e| ApiError::from_lightning(e, state.redact_errors))?;

	info!(payment_hash = %invoice.payment_hash, "invoice created");
	Ok(ApiResponse::created(InvoiceResponse {
		payment_request: invoice.payment_request.clone(),
		payment_hash: invoice.payment_hash.clone(),
		amount_sats: invoice.amount_msat / 1_000,
		description: invoice.description.clone(),
		expires_at: invoice.created_at + Duration::seconds(invoice.expiry_secs as i64),
		created_at: invoice.created_at,
	}))
}

/// Wire shape of a decoded invoice.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DecodedInvoiceResponse {
	pub payment_hash: String,
	pub amount_msat: u64,
	pub amount_sats: u64,
	pub description: String,
	pub expiry: u64,
	pub created_at: DateTime<Utc>,
}

/// POST /lightning/invoices/decode - decode a payment request
pub async fn decode_invoice(
	State(state): State<AppState>,
	Json(request): Json<DecodeInvoiceRequest>,
) -> Result<Json<ApiResponse<DecodedInvoiceResponse>>, ApiError> {
	let decoded = state
		.lightning
		.decode_invoice(&request)
		.await
		.map_err(|e| ApiError::from_lightning(e, state.redact_errors))?;

	Ok(ApiResponse::ok(DecodedInvoiceResponse {
		payment_hash: decoded.payment_hash,
		amount_msat: decoded.amount_msat,
		amount_sats: decoded.amount_msat / 1_000,
		description: decoded.description,
		expiry: decoded.expiry_secs,
		created_at: decoded.created_at,
	}))
}

/// Wire shape of an outgoing payment.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LightningPaymentResponse {
	pub payment_hash: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payment_preimage: Option<String>,
	pub amount_sats: u64,
	pub fee_sats: u64,
	pub status: String,
	pub created_at: DateTime<Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub settled_at: Option<DateTime<Utc>>,
}

/// POST /lightning/payments - pay an invoice
pub async fn pay_invoice(
	State(state): State<AppState>,
	Json(request): Json<PayInvoiceRequest>,
) -> Result<Json<ApiResponse<LightningPaymentResponse>>, ApiError> {
	let payment = state
		.lightning
		.pay_invoice(&request)
		.await
		.map_err(|e| ApiError::from_lightning(e, state.redact_errors))?;

	Ok(ApiResponse::ok(LightningPaymentResponse {
		payment_hash: payment.payment_hash,
		payment_preimage: payment.payment_preimage,
		amount_sats: payment.amount_msat / 1_000,
		fee_sats: payment.fee_msat / 1_000,
		status: format!("{:?}", payment.status).to_lowercase(),
		created_at: payment.created_at,
		settled_at: payment.settled_at,
	}))
}

/// GET /lightning/payments/{payment_hash} - payment status
pub async fn payment_status(
	State(state): State<AppState>,
	Path(payment_hash): Path<String>,
) -> Result<Json<ApiResponse<LightningPaymentResponse>>, ApiError> {
	let payment = state
		.lightning
		.payment_status(&payment_hash)
		.await
		.map_err(|e| ApiError::from_lightning(e, state.redact_errors))?;

	Ok(ApiResponse::ok(LightningPaymentResponse {
		payment_hash: payment.payment_hash,
		payment_preimage: payment.payment_preimage,
		amount_sats: payment.amount_msat / 1_000,
		fee_sats: payment.fee_msat / 1_000,
		status: format!("{:?}", payment.status).to_lowercase(),
		created_at: payment.created_at,
		settled_at: payment.settled_at,
	}))
}

/// Routing fee estimate.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RoutingFeeResponse {
	pub amount_sats: u64,
	pub estimated_fee_sats: u64,
	pub estimated_fee_msat: u64,
	pub fee_rate_percent: String,
}

/// GET /lightning/fees/estimate/{amount_sats} - routing fee estimate
pub async fn estimate_fee(
	State(state): State<AppState>,
	Path(amount_sats): Path<u64>,
) -> Json<ApiResponse<RoutingFeeResponse>> {
	let amount_msat = amount_sats * 1_000;
	let fee_msat = state.lightning.estimate_routing_fee(amount_msat);
	let rate = if amount_msat == 0 {
		0.0
	} else {
		fee_msat as f64 / amount_msat as f64 * 100.0
	};

	ApiResponse::ok(RoutingFeeResponse {
		amount_sats,
		estimated_fee_sats: fee_msat / 1_000,
		estimated_fee_msat: fee_msat,
		fee_rate_percent: format!("{rate:.4}"),
	})
}

/// Wire shape of a submarine swap invoice.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SubmarineSwapResponse {
	pub payment_request: String,
	pub payment_hash: String,
	pub amount_sats: u64,
	pub expiry_blocks: u64,
	pub expires_at: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
}

/// POST /lightning/submarine-swaps - invoice for a submarine swap
pub async fn submarine_swap(
	State(state): State<AppState>,
	Json(request): Json<SubmarineSwapRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmarineSwapResponse>>), ApiError> {
	let expiry_blocks = request.expiry_blocks.unwrap_or(144).max(1) as u64;
	let invoice = state
		.lightning
		.submarine_swap_invoice(&request)
		.await
		.map_err(|e| ApiError::from_lightning(e, state.redact_errors))?;

	Ok(ApiResponse::created(SubmarineSwapResponse {
		payment_request: invoice.payment_request.clone(),
		payment_hash: invoice.payment_hash.clone(),
		amount_sats: invoice.amount_msat / 1_000,
		expiry_blocks,
		expires_at: invoice.created_at + Duration::seconds(expiry_blocks as i64 * 600),
		created_at: invoice.created_at,
	}))
}

/// Freshly generated preimage pair.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PreimageResponse {
	pub preimage: String,
	pub hash: String,
	pub generated_at: DateTime<Utc>,
}

/// POST /lightning/preimages - generate an HTLC preimage
pub async fn generate_preimage(State(state): State<AppState>) -> Json<ApiResponse<PreimageResponse>> {
	let PreimagePair { preimage, hash } = state.lightning.generate_preimage();
	ApiResponse::ok(PreimageResponse {
		preimage,
		hash,
		generated_at: Utc::now(),
	})
}

/// Wire shape of a confirmed HTLC lock.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HtlcLockResponse {
	pub payment_id: String,
	pub preimage_hash: String,
	pub amount: u64,
	pub timelock: i64,
	pub recipient: String,
	pub tx_id: String,
	pub locked_at: DateTime<Utc>,
}

/// POST /lightning/lock - lock funds against a preimage hash
pub async fn lock(
	State(state): State<AppState>,
	Json(request): Json<HtlcLockRequest>,
) -> Result<Json<ApiResponse<HtlcLockResponse>>, ApiError> {
	let (lock, tx_id) = state
		.lightning
		.lock(&request)
		.await
		.map_err(|e| ApiError::from_lightning(e, state.redact_errors))?;

	Ok(ApiResponse::ok(HtlcLockResponse {
		payment_id: lock.payment_id.to_string(),
		preimage_hash: lock.preimage_hash,
		amount: lock.amount,
		timelock: lock.timelock,
		recipient: lock.recipient,
		tx_id: tx_id.to_string(),
		locked_at: Utc::now(),
	}))
}

/// Wire shape of a settled HTLC claim or refund.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HtlcSettleResponse {
	pub tx_id: String,
	pub settled_at: DateTime<Utc>,
}

/// POST /lightning/claim - claim a lock by revealing its preimage
pub async fn claim(
	State(state): State<AppState>,
	Json(request): Json<HtlcClaimRequest>,
) -> Result<Json<ApiResponse<HtlcSettleResponse>>, ApiError> {
	let tx_id = state
		.lightning
		.claim(&request)
		.await
		.map_err(|e| ApiError::from_lightning(e, state.redact_errors))?;

	Ok(ApiResponse::ok(HtlcSettleResponse {
		tx_id: tx_id.to_string(),
		settled_at: Utc::now(),
	}))
}

/// POST /lightning/refund - refund an expired lock
pub async fn refund(
	State(state): State<AppState>,
	Json(request): Json<HtlcRefundRequest>,
) -> Result<Json<ApiResponse<HtlcSettleResponse>>, ApiError> {
	let tx_id = state
		.lightning
		.refund(&request)
		.await
		.map_err(|e| ApiError::from_lightning(e, state.redact_errors))?;

	Ok(ApiResponse::ok(HtlcSettleResponse {
		tx_id: tx_id.to_string(),
		settled_at: Utc::now(),
	}))
}
