//! Payment intent handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use sflow_service::FeeBreakdown;
use sflow_types::payments::{
	CreatePaymentIntentRequest, PaymentId, PaymentIntentResponse, PaymentStatusResponse,
	TransitionResponse,
};

use crate::pagination::{PageParams, Pagination};
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

fn parse_id(state: &AppState, id: &str) -> Result<PaymentId, ApiError> {
	PaymentId::from_hex(id).map_err(|e| ApiError::from_payment(e, state.redact_errors))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/payments/intents",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 201, description = "Payment intent created", body = PaymentIntentResponse),
        (status = 400, description = "Validation failed"),
        (status = 501, description = "Settlement method not supported")
    ),
    tag = "payments"
))]
/// POST /payments/intents - create a payment intent
pub async fn create_intent(
	State(state): State<AppState>,
	Json(request): Json<CreatePaymentIntentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentIntentResponse>>), ApiError> {
	let intent = state
		.payments
		.create(&request)
		.await
		.map_err(|e| ApiError::from_payment(e, state.redact_errors))?;

	Ok(ApiResponse::created(PaymentIntentResponse::from(&intent)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/payments/intents/{id}",
    params(("id" = String, Path, description = "Hex-encoded payment intent id")),
    responses(
        (status = 200, description = "Payment intent", body = PaymentIntentResponse),
        (status = 404, description = "Payment intent not found")
    ),
    tag = "payments"
))]
/// GET /payments/intents/{id} - fetch a payment intent
pub async fn get_intent(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ApiResponse<PaymentIntentResponse>>, ApiError> {
	let payment_id = parse_id(&state, &id)?;

	let intent = state
		.payments
		.get(&payment_id)
		.await
		.map_err(|e| ApiError::from_payment(e, state.redact_errors))?
		.ok_or_else(|| ApiError::not_found("Payment intent not found"))?;

	Ok(ApiResponse::ok(PaymentIntentResponse::from(&intent)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/payments/intents/{id}/process",
    params(("id" = String, Path, description = "Hex-encoded payment intent id")),
    responses(
        (status = 200, description = "Payment confirmed", body = TransitionResponse),
        (status = 409, description = "Illegal lifecycle transition")
    ),
    tag = "payments"
))]
/// POST /payments/intents/{id}/process - confirm a pending payment
pub async fn process_intent(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ApiResponse<TransitionResponse>>, ApiError> {
	let payment_id = parse_id(&state, &id)?;

	let receipt = state
		.payments
		.process(&payment_id)
		.await
		.map_err(|e| ApiError::from_payment(e, state.redact_errors))?;

	info!(%payment_id, "payment processed");
	Ok(ApiResponse::ok(TransitionResponse::processed(&receipt)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/payments/intents/{id}/complete",
    params(("id" = String, Path, description = "Hex-encoded payment intent id")),
    responses(
        (status = 200, description = "Payment completed", body = TransitionResponse),
        (status = 409, description = "Illegal lifecycle transition")
    ),
    tag = "payments"
))]
/// POST /payments/intents/{id}/complete - settle a confirmed payment
pub async fn complete_intent(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ApiResponse<TransitionResponse>>, ApiError> {
	let payment_id = parse_id(&state, &id)?;

	let receipt = state
		.payments
		.complete(&payment_id)
		.await
		.map_err(|e| ApiError::from_payment(e, state.redact_errors))?;

	info!(%payment_id, "payment completed");
	Ok(ApiResponse::ok(TransitionResponse::completed(&receipt)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/payments/intents/{id}/cancel",
    params(("id" = String, Path, description = "Hex-encoded payment intent id")),
    responses(
        (status = 200, description = "Payment cancelled", body = TransitionResponse),
        (status = 409, description = "Illegal lifecycle transition")
    ),
    tag = "payments"
))]
/// POST /payments/intents/{id}/cancel - cancel a pending payment
pub async fn cancel_intent(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ApiResponse<TransitionResponse>>, ApiError> {
	let payment_id = parse_id(&state, &id)?;

	let receipt = state
		.payments
		.cancel(&payment_id)
		.await
		.map_err(|e| ApiError::from_payment(e, state.redact_errors))?;

	info!(%payment_id, "payment cancelled");
	Ok(ApiResponse::ok(TransitionResponse::cancelled(&receipt)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/payments/intents/{id}/status",
    params(("id" = String, Path, description = "Hex-encoded payment intent id")),
    responses(
        (status = 200, description = "Current status", body = PaymentStatusResponse),
        (status = 404, description = "Payment intent not found")
    ),
    tag = "payments"
))]
/// GET /payments/intents/{id}/status - current status from the ledger
pub async fn intent_status(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ApiResponse<PaymentStatusResponse>>, ApiError> {
	let payment_id = parse_id(&state, &id)?;

	let status = state
		.payments
		.status(&payment_id)
		.await
		.map_err(|e| ApiError::from_payment(e, state.redact_errors))?;

	debug!(%payment_id, %status, "status checked");
	Ok(ApiResponse::ok(PaymentStatusResponse {
		payment_id: payment_id.to_string(),
		status: status.to_string(),
		checked_at: Utc::now(),
	}))
}

/// Fee quote for a prospective amount.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FeeResponse {
	pub amount: u64,
	pub protocol_fee: u64,
	pub net_amount: u64,
}

impl From<FeeBreakdown> for FeeResponse {
	fn from(fees: FeeBreakdown) -> Self {
		Self {
			amount: fees.amount,
			protocol_fee: fees.protocol_fee,
			net_amount: fees.net_amount,
		}
	}
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/payments/fees/{amount}",
    params(("amount" = u64, Path, description = "Amount in the smallest currency unit")),
    responses((status = 200, description = "Fee breakdown", body = FeeResponse)),
    tag = "payments"
))]
/// GET /payments/fees/{amount} - protocol fee breakdown
pub async fn calculate_fees(
	State(state): State<AppState>,
	Path(amount): Path<u64>,
) -> Json<ApiResponse<FeeResponse>> {
	ApiResponse::ok(FeeResponse::from(state.payments.calculate_fees(amount)))
}

/// Paginated payment list.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PaymentListResponse {
	pub payments: Vec<PaymentIntentResponse>,
	pub pagination: Pagination,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/payments",
    responses((status = 200, description = "Paginated payments", body = PaymentListResponse)),
    tag = "payments"
))]
/// GET /payments - list payments
///
/// The ledger is the system of record and exposes no enumeration, so this
/// answers an empty page with the final response contract.
pub async fn list_payments(
	Query(params): Query<PageParams>,
) -> Json<ApiResponse<PaymentListResponse>> {
	ApiResponse::ok(PaymentListResponse {
		payments: Vec::new(),
		pagination: Pagination::empty(&params),
	})
}
