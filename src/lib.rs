//! sflow payment gateway library.
//!
//! A Bitcoin/Stacks payment gateway: an HTTP API that forwards merchant
//! registration and payment-intent operations to the `sflow` settlement
//! contract, with a deterministic mock ledger for offline development.
//!
//! [`GatewayBuilder`] wires configuration, adapters and services into an
//! axum router:
//!
//! ```no_run
//! use sflow_gateway::GatewayBuilder;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! GatewayBuilder::new().start_server().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use sflow_adapters::{MockAdapter, MockBitcoinNode, MockLightningNode, StacksAdapter, StacksAdapterConfig};
use sflow_api::{auth_middleware, ApiKeyAuthenticator, AuthConfig, MemoryRateLimiter};
use sflow_config::{AdapterMode, Settings, SettingsError, StacksNetwork};
use sflow_service::{
	LightningService, MerchantService, PaymentService, SwapService, WebhookVerifier,
};
use sflow_types::auth::RateLimits;
use sflow_types::{AdapterError, BitcoinNode, LightningNode, SettlementAdapter};

// Core domain types, re-exported for embedders and tests.
pub use sflow_types::{
	AuthenticationResult,
	Authenticator,
	MerchantContext,
	// Primary domain entities
	PaymentIntent,
	PaymentMethod,
	PaymentStatus,
	// Error types
	PaymentError,
	MerchantError,
	LightningError,
	SwapError,
};

// Service layer
pub use sflow_service::{WebhookError, WebhookVerify};

// API layer
pub use sflow_api::{create_router, ApiError, ApiResponse, AppState};

// Config
pub use sflow_config::load_config;
pub use sflow_config::Settings as GatewaySettings;

// Module aliases for embedders who want the full crates.
pub mod adapters {
	pub use sflow_adapters::*;
}

pub mod api {
	pub use sflow_api::*;
}

pub mod config {
	pub use sflow_config::*;
}

pub mod service {
	pub use sflow_service::*;
}

pub mod types {
	pub use sflow_types::*;
}

/// Errors surfaced while assembling or running the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
	#[error("configuration error: {0}")]
	Settings(#[from] SettingsError),

	#[error("adapter setup failed: {0}")]
	Adapter(#[from] AdapterError),

	#[error("server error: {0}")]
	Io(#[from] std::io::Error),
}

/// Builder wiring configuration, backends and services into a router.
///
/// Backends not supplied explicitly are constructed from settings: the
/// settlement adapter per `adapter.mode`, and mock Lightning/Bitcoin nodes
/// (the only implementations this deployment ships).
#[derive(Default)]
pub struct GatewayBuilder {
	settings: Option<Settings>,
	adapter: Option<Arc<dyn SettlementAdapter>>,
	lightning_node: Option<Arc<dyn LightningNode>>,
	bitcoin_node: Option<Arc<dyn BitcoinNode>>,
}

impl GatewayBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Override the settlement adapter (tests, embedders).
	pub fn with_adapter(mut self, adapter: Arc<dyn SettlementAdapter>) -> Self {
		self.adapter = Some(adapter);
		self
	}

	pub fn with_lightning_node(mut self, node: Arc<dyn LightningNode>) -> Self {
		self.lightning_node = Some(node);
		self
	}

	pub fn with_bitcoin_node(mut self, node: Arc<dyn BitcoinNode>) -> Self {
		self.bitcoin_node = Some(node);
		self
	}

	fn build_adapter(settings: &Settings) -> Result<Arc<dyn SettlementAdapter>, GatewayError> {
		match settings.adapter.mode {
			AdapterMode::Mock => Ok(Arc::new(MockAdapter::new())),
			AdapterMode::Live => {
				let network = match settings.stacks.network {
					StacksNetwork::Mainnet => "mainnet",
					StacksNetwork::Testnet => "testnet",
					StacksNetwork::Devnet => "devnet",
				};
				let adapter = StacksAdapter::new(
					StacksAdapterConfig {
						api_url: settings.stacks.api_url(),
						contract_address: settings.stacks.contract_address.clone(),
						contract_name: settings.stacks.contract_name.clone(),
						network: network.to_string(),
						timeout_ms: settings.stacks.timeout_ms,
					},
					settings.sender_key()?,
				)?;
				Ok(Arc::new(adapter))
			},
		}
	}

	/// Assemble the router and shared state without binding a socket.
	pub fn build(self) -> Result<(axum::Router, AppState), GatewayError> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let adapter = match self.adapter {
			Some(adapter) => adapter,
			None => Self::build_adapter(&settings)?,
		};
		if adapter.is_simulated() {
			warn!("settlement adapter is simulated; transactions are fabricated");
		}

		let lightning_node: Arc<dyn LightningNode> = self
			.lightning_node
			.unwrap_or_else(|| Arc::new(MockLightningNode::new()));
		let bitcoin_node: Arc<dyn BitcoinNode> = self
			.bitcoin_node
			.unwrap_or_else(|| Arc::new(MockBitcoinNode::new()));

		let state = AppState {
			payments: Arc::new(PaymentService::new(adapter.clone(), settings.amount_limits())),
			merchants: Arc::new(MerchantService::new(adapter.clone())),
			lightning: Arc::new(LightningService::new(lightning_node, adapter.clone())),
			swaps: Arc::new(SwapService::new(adapter.clone(), bitcoin_node)),
			webhooks: Arc::new(WebhookVerifier::new(settings.webhook_secret()?)),
			redact_errors: settings.is_production(),
		};

		let authenticator = Arc::new(ApiKeyAuthenticator::from_table(
			settings
				.auth
				.api_keys
				.iter()
				.map(|(key, entry)| (key.clone(), entry.merchant.clone())),
		));
		let rate_limiter = Arc::new(MemoryRateLimiter::new());
		let auth_config = AuthConfig {
			enable_rate_limiting: settings.auth.rate_limiting.enabled,
			rate_limits: RateLimits {
				requests_per_minute: settings.auth.rate_limiting.requests_per_minute,
			},
			..AuthConfig::default()
		};

		let router = create_router()
			.layer(axum::middleware::from_fn(
				move |request: axum::extract::Request, next: axum::middleware::Next| {
					let authenticator = authenticator.clone();
					let rate_limiter = rate_limiter.clone();
					let config = auth_config.clone();
					async move {
						auth_middleware(authenticator, rate_limiter, config, request, next).await
					}
				},
			))
			.with_state(state.clone());

		Ok((router, state))
	}

	/// Build and serve until a shutdown signal arrives.
	pub async fn start_server(self) -> Result<(), GatewayError> {
		let bind_address = self
			.settings
			.as_ref()
			.map(Settings::bind_address)
			.unwrap_or_else(|| Settings::default().bind_address());

		let (router, _state) = self.build()?;

		let listener = TcpListener::bind(&bind_address).await?;
		info!(%bind_address, "sflow gateway listening");

		axum::serve(listener, router)
			.with_graceful_shutdown(shutdown_signal())
			.await?;
		Ok(())
	}
}

async fn shutdown_signal() {
	if tokio::signal::ctrl_c().await.is_ok() {
		info!("shutdown signal received");
	}
}
