//! Merchant handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use tracing::info;

use sflow_service::{MultiSigSignature, SubscriptionCharge, YieldEstimate};
use sflow_types::auth::MerchantContext;
use sflow_types::merchants::{
	CreateMultiSigTxRequest, CreateSubscriptionRequest, CreateYieldPositionRequest,
	MerchantCheckResponse, MerchantInfoResponse, MerchantStatsResponse, MultiSigTxResponse,
	RegisterMerchantRequest, RegisterMerchantResponse, SubscriptionResponse,
	YieldPositionResponse, YieldSummaryResponse,
};

use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/merchants/register",
    request_body = RegisterMerchantRequest,
    responses(
        (status = 201, description = "Merchant registered", body = RegisterMerchantResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Merchant already registered")
    ),
    tag = "merchants"
))]
/// POST /merchants/register - register the calling merchant
pub async fn register(
	State(state): State<AppState>,
	Extension(context): Extension<MerchantContext>,
	Json(request): Json<RegisterMerchantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterMerchantResponse>>), ApiError> {
	let merchant = state
		.merchants
		.register(&context.api_key, &request)
		.await
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	info!(merchant = %context.name, "merchant registered");
	Ok(ApiResponse::created(RegisterMerchantResponse::from(&merchant)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/merchants/check/{address}",
    params(("address" = String, Path, description = "Merchant identity")),
    responses((status = 200, description = "Registration status", body = MerchantCheckResponse)),
    tag = "merchants"
))]
/// GET /merchants/check/{address} - registration status
pub async fn check(
	State(state): State<AppState>,
	Path(address): Path<String>,
) -> Result<Json<ApiResponse<MerchantCheckResponse>>, ApiError> {
	let registered = state
		.merchants
		.is_registered(&address)
		.await
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	Ok(ApiResponse::ok(MerchantCheckResponse {
		address,
		registered,
		checked_at: Utc::now(),
	}))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/merchants/{address}",
    params(("address" = String, Path, description = "Merchant identity")),
    responses(
        (status = 200, description = "Merchant info", body = MerchantInfoResponse),
        (status = 404, description = "Merchant not registered")
    ),
    tag = "merchants"
))]
/// GET /merchants/{address} - merchant info, 404 when unregistered
pub async fn info_by_address(
	State(state): State<AppState>,
	Path(address): Path<String>,
) -> Result<Json<ApiResponse<MerchantInfoResponse>>, ApiError> {
	state
		.merchants
		.require_registered(&address)
		.await
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	Ok(ApiResponse::ok(MerchantInfoResponse {
		merchant: address,
		registered: true,
		checked_at: Utc::now(),
	}))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/merchants/stats/{address}",
    params(("address" = String, Path, description = "Merchant identity")),
    responses(
        (status = 200, description = "Merchant statistics", body = MerchantStatsResponse),
        (status = 404, description = "Merchant not registered")
    ),
    tag = "merchants"
))]
/// GET /merchants/stats/{address} - aggregate statistics
pub async fn stats(
	State(state): State<AppState>,
	Path(address): Path<String>,
) -> Result<Json<ApiResponse<MerchantStatsResponse>>, ApiError> {
	let stats = state
		.merchants
		.stats(&address)
		.await
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	Ok(ApiResponse::ok(MerchantStatsResponse {
		merchant: stats.merchant,
		total_volume: stats.total_volume,
		active_payments: stats.active_payments,
		success_rate: stats.success_rate,
		yield_earned: stats.yield_earned,
	}))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/merchants/subscriptions",
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = SubscriptionResponse),
        (status = 400, description = "Validation failed")
    ),
    tag = "merchants"
))]
/// POST /merchants/subscriptions - create a recurring billing agreement
pub async fn create_subscription(
	State(state): State<AppState>,
	Extension(context): Extension<MerchantContext>,
	Json(request): Json<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubscriptionResponse>>), ApiError> {
	let subscription = state
		.merchants
		.create_subscription(&context.api_key, &request)
		.await
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	Ok(ApiResponse::created(SubscriptionResponse::from(&subscription)))
}

/// POST /merchants/subscriptions/{id}/process - charge a subscription
pub async fn process_subscription(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ApiResponse<SubscriptionCharge>>, ApiError> {
	let charge = state
		.merchants
		.process_subscription(&id)
		.await
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	Ok(ApiResponse::ok(charge))
}

/// GET /merchants/yield - yield summary for the calling merchant
pub async fn yield_summary(
	Extension(context): Extension<MerchantContext>,
) -> Json<ApiResponse<YieldSummaryResponse>> {
	ApiResponse::ok(YieldSummaryResponse {
		merchant: context.api_key,
		total_deposited: 0,
		yield_earned: 0,
		last_compound: Utc::now(),
		estimated_apy: "5.0%".to_string(),
	})
}

/// POST /merchants/yield-positions - deploy funds into a yield strategy
pub async fn create_yield_position(
	State(state): State<AppState>,
	Json(request): Json<CreateYieldPositionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<YieldPositionResponse>>), ApiError> {
	let position = state
		.merchants
		.create_yield_position(&request)
		.await
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	Ok(ApiResponse::created(YieldPositionResponse::from(&position)))
}

/// GET /merchants/yield/estimate/{amount}/{duration} - projected return
pub async fn estimate_yield(
	State(state): State<AppState>,
	Path((amount, duration)): Path<(u64, u64)>,
) -> Result<Json<ApiResponse<YieldEstimate>>, ApiError> {
	let estimate = state
		.merchants
		.estimate_yield(amount, duration)
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	Ok(ApiResponse::ok(estimate))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/merchants/multisig/transactions",
    request_body = CreateMultiSigTxRequest,
    responses(
        (status = 201, description = "Proposal created", body = MultiSigTxResponse),
        (status = 400, description = "Validation failed")
    ),
    tag = "merchants"
))]
/// POST /merchants/multisig/transactions - propose a multi-sig spend
pub async fn create_multisig_tx(
	State(state): State<AppState>,
	Extension(context): Extension<MerchantContext>,
	Json(request): Json<CreateMultiSigTxRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MultiSigTxResponse>>), ApiError> {
	let tx = state
		.merchants
		.create_multisig_tx(&context.api_key, &request)
		.await
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	Ok(ApiResponse::created(MultiSigTxResponse::from(&tx)))
}

/// POST /merchants/multisig/transactions/{id}/sign - add a signature
pub async fn sign_multisig_tx(
	State(state): State<AppState>,
	Extension(context): Extension<MerchantContext>,
	Path(id): Path<String>,
) -> Result<Json<ApiResponse<MultiSigSignature>>, ApiError> {
	let signature = state
		.merchants
		.sign_multisig_tx(&id, &context.api_key)
		.await
		.map_err(|e| ApiError::from_merchant(e, state.redact_errors))?;

	Ok(ApiResponse::ok(signature))
}
