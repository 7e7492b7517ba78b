//! Test server spawned on an ephemeral port with the mock adapter.

use tokio::task::JoinHandle;

use sflow_gateway::config::{ApiKeyEntry, ConfigurableValue, Settings};
use sflow_gateway::GatewayBuilder;

/// Bearer credential configured on every test server.
pub const TEST_API_KEY: &str = "sk_test_1234567890abcdef";

/// Webhook HMAC secret configured on every test server.
pub const TEST_WEBHOOK_SECRET: &str = "test-webhook-secret";

pub struct TestServer {
	pub base_url: String,
	handle: JoinHandle<()>,
}

impl TestServer {
	/// Spawn a gateway with the mock settlement adapter and one test key.
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		let mut settings = Settings::default();
		settings.webhook.secret = Some(ConfigurableValue::from_plain(TEST_WEBHOOK_SECRET));
		settings.auth.api_keys.insert(
			TEST_API_KEY.to_string(),
			ApiKeyEntry {
				merchant: "Test Merchant".to_string(),
			},
		);

		let (router, _state) = GatewayBuilder::new().with_settings(settings).build()?;

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, router).await;
		});

		Ok(Self {
			base_url: format!("http://{addr}"),
			handle,
		})
	}

	pub fn abort(&self) {
		self.handle.abort();
	}
}
