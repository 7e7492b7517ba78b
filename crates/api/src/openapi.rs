//! OpenAPI documentation, available behind the `openapi` feature.

use utoipa::OpenApi;

use crate::handlers::health::HealthResponse;
use crate::handlers::payments::{FeeResponse, PaymentListResponse};
use crate::pagination::Pagination;
use crate::response::ErrorBody;
use sflow_types::merchants::{
	CreateMultiSigTxRequest, CreateSubscriptionRequest, MerchantCheckResponse,
	MerchantInfoResponse, MerchantStatsResponse, MultiSigTxResponse, RegisterMerchantRequest,
	RegisterMerchantResponse, SubscriptionResponse,
};
use sflow_types::payments::{
	CreatePaymentIntentRequest, PaymentIntentResponse, PaymentStatusResponse, TransitionResponse,
};

#[derive(OpenApi)]
#[openapi(
	paths(
		crate::handlers::health::health,
		crate::handlers::payments::create_intent,
		crate::handlers::payments::get_intent,
		crate::handlers::payments::process_intent,
		crate::handlers::payments::complete_intent,
		crate::handlers::payments::cancel_intent,
		crate::handlers::payments::intent_status,
		crate::handlers::payments::calculate_fees,
		crate::handlers::payments::list_payments,
		crate::handlers::merchants::register,
		crate::handlers::merchants::check,
		crate::handlers::merchants::info_by_address,
		crate::handlers::merchants::stats,
		crate::handlers::merchants::create_subscription,
		crate::handlers::merchants::create_multisig_tx,
	),
	components(schemas(
		HealthResponse,
		ErrorBody,
		Pagination,
		FeeResponse,
		PaymentListResponse,
		CreatePaymentIntentRequest,
		PaymentIntentResponse,
		PaymentStatusResponse,
		TransitionResponse,
		RegisterMerchantRequest,
		RegisterMerchantResponse,
		MerchantCheckResponse,
		MerchantInfoResponse,
		MerchantStatsResponse,
		CreateSubscriptionRequest,
		SubscriptionResponse,
		CreateMultiSigTxRequest,
		MultiSigTxResponse,
	)),
	tags(
		(name = "health", description = "Liveness"),
		(name = "payments", description = "Payment intent lifecycle"),
		(name = "merchants", description = "Merchant registration and tooling"),
	)
)]
pub struct ApiDoc;
