//! Swap handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use sflow_service::{ExecutedSwap, SwapClaimReceipt, SwapStatusReport};
use sflow_types::swaps::{
	AtomicSwap, AtomicSwapRequest, ExecuteSwapRequest, SwapClaimRequest, SwapQuote,
	SwapQuoteRequest,
};

use crate::pagination::{PageParams, Pagination};
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

/// Wire shape of an atomic swap.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AtomicSwapResponse {
	pub swap_id: String,
	pub btc_txid: String,
	pub btc_output_index: u32,
	pub amount: u64,
	pub btc_address: String,
	pub recipient: String,
	pub status: String,
	pub expires_at: chrono::DateTime<chrono::Utc>,
	pub created_at: chrono::DateTime<chrono::Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contract_tx_id: Option<String>,
}

impl From<&AtomicSwap> for AtomicSwapResponse {
	fn from(swap: &AtomicSwap) -> Self {
		Self {
			swap_id: swap.id.to_string(),
			btc_txid: swap.btc_txid.clone(),
			btc_output_index: swap.btc_output_index,
			amount: swap.amount,
			btc_address: swap.btc_address.clone(),
			recipient: swap.recipient.clone(),
			status: swap.status.to_string(),
			expires_at: swap.expires_at,
			created_at: swap.created_at,
			contract_tx_id: swap.tx_id.as_ref().map(|tx| tx.to_string()),
		}
	}
}

/// POST /swaps/atomic - initiate a BTC atomic swap
pub async fn initiate_atomic(
	State(state): State<AppState>,
	Json(request): Json<AtomicSwapRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AtomicSwapResponse>>), ApiError> {
	let swap = state
		.swaps
		.initiate(&request)
		.await
		.map_err(|e| ApiError::from_swap(e, state.redact_errors))?;

	info!(swap = %swap.id, "atomic swap initiated");
	Ok(ApiResponse::created(AtomicSwapResponse::from(&swap)))
}

/// POST /swaps/atomic/{id}/claim - claim with a Bitcoin inclusion proof
pub async fn claim_atomic(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<SwapClaimRequest>,
) -> Result<Json<ApiResponse<SwapClaimReceipt>>, ApiError> {
	let receipt = state
		.swaps
		.claim(&id, &request)
		.await
		.map_err(|e| ApiError::from_swap(e, state.redact_errors))?;

	Ok(ApiResponse::ok(receipt))
}

/// GET /swaps/atomic/{id} - fetch an atomic swap
pub async fn get_atomic(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ApiResponse<AtomicSwapResponse>>, ApiError> {
	let swap = state
		.swaps
		.get(&id)
		.await
		.map_err(|e| ApiError::from_swap(e, state.redact_errors))?
		.ok_or_else(|| ApiError::not_found("Atomic swap not found"))?;

	Ok(ApiResponse::ok(AtomicSwapResponse::from(&swap)))
}

/// POST /swaps/quote - price a cross-chain exchange
pub async fn quote(
	State(state): State<AppState>,
	Json(request): Json<SwapQuoteRequest>,
) -> Result<Json<ApiResponse<SwapQuote>>, ApiError> {
	let quote = state
		.swaps
		.quote(&request)
		.map_err(|e| ApiError::from_swap(e, state.redact_errors))?;

	Ok(ApiResponse::ok(quote))
}

/// POST /swaps/execute - accept a swap for execution
pub async fn execute(
	State(state): State<AppState>,
	Json(request): Json<ExecuteSwapRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExecutedSwap>>), ApiError> {
	let executed = state
		.swaps
		.execute(&request)
		.map_err(|e| ApiError::from_swap(e, state.redact_errors))?;

	Ok(ApiResponse::created(executed))
}

/// GET /swaps/{id}/status - execution progress
pub async fn status(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Json<ApiResponse<SwapStatusReport>> {
	ApiResponse::ok(state.swaps.status_report(&id))
}

/// Paginated swap list.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SwapListResponse {
	pub swaps: Vec<AtomicSwapResponse>,
	pub pagination: Pagination,
}

/// GET /swaps - list swaps
///
/// The ledger exposes no enumeration; this answers an empty page with the
/// final response contract.
pub async fn list(Query(params): Query<PageParams>) -> Json<ApiResponse<SwapListResponse>> {
	ApiResponse::ok(SwapListResponse {
		swaps: Vec::new(),
		pagination: Pagination::empty(&params),
	})
}
