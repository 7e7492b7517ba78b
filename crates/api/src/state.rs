use std::sync::Arc;

use sflow_service::{
	LightningService, MerchantService, PaymentService, SwapService, WebhookVerify,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub payments: Arc<PaymentService>,
	pub merchants: Arc<MerchantService>,
	pub lightning: Arc<LightningService>,
	pub swaps: Arc<SwapService>,
	pub webhooks: Arc<dyn WebhookVerify>,
	/// Redact settlement error detail in responses (production profiles).
	pub redact_errors: bool,
}
