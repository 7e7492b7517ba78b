use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::handlers::{health, lightning, merchants, payments, swaps, webhooks};
use crate::security::add_security_headers;
use crate::state::AppState;
#[cfg(feature = "openapi")]
use crate::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
#[cfg(feature = "openapi")]
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let body_limit = RequestBodyLimitLayer::new(1024 * 1024);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	let base_router = Router::new()
		.route("/health", get(health::health))
		// Payments
		.route("/payments", get(payments::list_payments))
		.route("/payments/intents", post(payments::create_intent))
		.route("/payments/intents/{id}", get(payments::get_intent))
		.route("/payments/intents/{id}/process", post(payments::process_intent))
		.route("/payments/intents/{id}/complete", post(payments::complete_intent))
		.route("/payments/intents/{id}/cancel", post(payments::cancel_intent))
		.route("/payments/intents/{id}/status", get(payments::intent_status))
		.route("/payments/fees/{amount}", get(payments::calculate_fees))
		// Merchants
		.route("/merchants/register", post(merchants::register))
		.route("/merchants/check/{address}", get(merchants::check))
		.route("/merchants/stats/{address}", get(merchants::stats))
		.route("/merchants/subscriptions", post(merchants::create_subscription))
		.route(
			"/merchants/subscriptions/{id}/process",
			post(merchants::process_subscription),
		)
		.route("/merchants/yield", get(merchants::yield_summary))
		.route("/merchants/yield-positions", post(merchants::create_yield_position))
		.route(
			"/merchants/yield/estimate/{amount}/{duration}",
			get(merchants::estimate_yield),
		)
		.route(
			"/merchants/multisig/transactions",
			post(merchants::create_multisig_tx),
		)
		.route(
			"/merchants/multisig/transactions/{id}/sign",
			post(merchants::sign_multisig_tx),
		)
		.route("/merchants/{address}", get(merchants::info_by_address))
		// Lightning
		.route("/lightning/invoices", post(lightning::create_invoice))
		.route("/lightning/invoices/decode", post(lightning::decode_invoice))
		.route("/lightning/payments", post(lightning::pay_invoice))
		.route(
			"/lightning/payments/{payment_hash}",
			get(lightning::payment_status),
		)
		.route(
			"/lightning/fees/estimate/{amount_sats}",
			get(lightning::estimate_fee),
		)
		.route("/lightning/submarine-swaps", post(lightning::submarine_swap))
		.route("/lightning/preimages", post(lightning::generate_preimage))
		.route("/lightning/lock", post(lightning::lock))
		.route("/lightning/claim", post(lightning::claim))
		.route("/lightning/refund", post(lightning::refund))
		// Swaps
		.route("/swaps", get(swaps::list))
		.route("/swaps/atomic", post(swaps::initiate_atomic))
		.route("/swaps/atomic/{id}/claim", post(swaps::claim_atomic))
		.route("/swaps/atomic/{id}", get(swaps::get_atomic))
		.route("/swaps/quote", post(swaps::quote))
		.route("/swaps/execute", post(swaps::execute))
		.route("/swaps/{id}/status", get(swaps::status))
		// Webhooks (signature-verified, not bearer-authenticated)
		.route("/webhooks/payment-update", post(webhooks::payment_update))
		.route("/webhooks/lightning-update", post(webhooks::lightning_update))
		.route("/webhooks/test", post(webhooks::test));

	#[cfg(feature = "openapi")]
	let router = base_router
		.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

	#[cfg(not(feature = "openapi"))]
	let router = base_router;

	let router = router
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit);

	add_security_headers(router)
}
