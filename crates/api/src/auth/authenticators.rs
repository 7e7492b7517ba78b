//! Credential lookup implementations.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use sflow_types::auth::{AuthenticationResult, Authenticator, MerchantContext};

/// Bearer-key authenticator over a static credential table.
///
/// The table is populated once at startup from configuration and read-only
/// afterwards; rejection never has side effects.
#[derive(Debug, Default)]
pub struct ApiKeyAuthenticator {
	api_keys: Arc<DashMap<String, MerchantContext>>,
}

impl ApiKeyAuthenticator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a credential with its merchant context.
	pub fn add_key(&self, api_key: String, context: MerchantContext) {
		self.api_keys.insert(api_key, context);
	}

	/// Build a table from `(key, merchant name)` pairs.
	pub fn from_table<I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let auth = Self::new();
		for (api_key, merchant) in entries {
			let context = MerchantContext::new(api_key.clone(), merchant);
			auth.add_key(api_key, context);
		}
		auth
	}
}

#[async_trait]
impl Authenticator for ApiKeyAuthenticator {
	async fn authenticate(&self, bearer: Option<&str>) -> AuthenticationResult {
		let Some(api_key) = bearer else {
			return AuthenticationResult::Unauthorized(
				"Missing or invalid authorization header".to_string(),
			);
		};

		match self.api_keys.get(api_key) {
			Some(context) => {
				debug!(merchant = %context.name, "request authenticated");
				AuthenticationResult::Authorized(context.clone())
			},
			None => AuthenticationResult::Unauthorized("Invalid API key".to_string()),
		}
	}

	fn name(&self) -> &str {
		"ApiKeyAuthenticator"
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn known_key_authenticates() {
		let auth =
			ApiKeyAuthenticator::from_table([("sk_test_abc".to_string(), "Test Merchant".to_string())]);

		match auth.authenticate(Some("sk_test_abc")).await {
			AuthenticationResult::Authorized(ctx) => {
				assert_eq!(ctx.name, "Test Merchant");
				assert_eq!(ctx.api_key, "sk_test_abc");
			},
			other => panic!("expected authorization, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn unknown_key_and_missing_header_are_rejected() {
		let auth = ApiKeyAuthenticator::new();
		assert!(matches!(
			auth.authenticate(Some("sk_bogus")).await,
			AuthenticationResult::Unauthorized(_)
		));
		assert!(matches!(
			auth.authenticate(None).await,
			AuthenticationResult::Unauthorized(_)
		));
	}
}
