//! Configuration settings structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sflow_types::validation::AmountLimits;
use sflow_types::SecretString;
use thiserror::Error;

use crate::configurable_value::{ConfigurableValue, ConfigurableValueError};

/// Main application settings.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub stacks: StacksSettings,
	pub adapter: AdapterSettings,
	pub webhook: WebhookSettings,
	pub auth: AuthSettings,
	pub limits: LimitSettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
}

/// HTTP server bind configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
		}
	}
}

/// Which Stacks chain the settlement adapter targets.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StacksNetwork {
	Mainnet,
	Testnet,
	Devnet,
}

impl StacksNetwork {
	/// Default node/API endpoint for the network.
	pub fn default_api_url(&self) -> &'static str {
		match self {
			Self::Mainnet => "https://api.hiro.so",
			Self::Testnet => "https://api.testnet.hiro.so",
			Self::Devnet => "http://localhost:3999",
		}
	}
}

/// Settlement contract and node configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StacksSettings {
	pub network: StacksNetwork,
	pub contract_address: String,
	pub contract_name: String,
	/// Overrides the network's default node/API endpoint.
	pub api_url: Option<String>,
	/// Transaction signing credential. Required for the live adapter in
	/// non-development profiles; never embedded with a default.
	pub sender_key: Option<ConfigurableValue>,
	/// Per-call timeout for adapter HTTP round trips.
	pub timeout_ms: u64,
}

impl Default for StacksSettings {
	fn default() -> Self {
		Self {
			network: StacksNetwork::Devnet,
			contract_address: "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".to_string(),
			contract_name: "sflow".to_string(),
			api_url: None,
			sender_key: None,
			timeout_ms: 10_000,
		}
	}
}

impl StacksSettings {
	/// Effective node/API endpoint.
	pub fn api_url(&self) -> String {
		self.api_url
			.clone()
			.unwrap_or_else(|| self.network.default_api_url().to_string())
	}
}

/// Which settlement adapter implementation to construct.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdapterMode {
	/// Deterministic in-memory ledger, for tests and offline development.
	Mock,
	/// Live Stacks node/API.
	Live,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AdapterSettings {
	pub mode: AdapterMode,
}

impl Default for AdapterSettings {
	fn default() -> Self {
		Self {
			mode: AdapterMode::Mock,
		}
	}
}

/// Webhook signature verification configuration.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WebhookSettings {
	/// Shared HMAC secret. Required in non-development profiles.
	pub secret: Option<ConfigurableValue>,
}

/// A configured API credential.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiKeyEntry {
	/// Merchant display name attached to the request context.
	pub merchant: String,
}

/// Bearer credential table and rate limiting.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AuthSettings {
	/// API key -> merchant. Static at runtime; loaded once at startup.
	pub api_keys: HashMap<String, ApiKeyEntry>,
	pub rate_limiting: RateLimitSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitSettings {
	pub enabled: bool,
	pub requests_per_minute: u32,
}

impl Default for RateLimitSettings {
	fn default() -> Self {
		Self {
			enabled: false,
			requests_per_minute: 100,
		}
	}
}

/// Payment amount bounds; the ledger-side minimum is provisional, so both
/// ends are configuration rather than constants.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct LimitSettings {
	pub min_amount: u64,
	pub max_amount: u64,
}

impl Default for LimitSettings {
	fn default() -> Self {
		let defaults = AmountLimits::default();
		Self {
			min_amount: defaults.min,
			max_amount: defaults.max,
		}
	}
}

/// Deployment profile.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
}

impl Default for EnvironmentSettings {
	fn default() -> Self {
		Self {
			profile: EnvironmentProfile::Development,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
		}
	}
}

/// Errors surfaced by settings resolution and startup validation.
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("missing required setting in {profile} profile: {setting}")]
	MissingSecret {
		profile: &'static str,
		setting: &'static str,
	},

	#[error(transparent)]
	Value(#[from] ConfigurableValueError),
}

impl Settings {
	/// Server bind address.
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Effective payment amount bounds.
	pub fn amount_limits(&self) -> AmountLimits {
		AmountLimits {
			min: self.limits.min_amount,
			max: self.limits.max_amount,
		}
	}

	pub fn is_production(&self) -> bool {
		self.environment.profile == EnvironmentProfile::Production
	}

	fn profile_name(&self) -> &'static str {
		match self.environment.profile {
			EnvironmentProfile::Development => "development",
			EnvironmentProfile::Staging => "staging",
			EnvironmentProfile::Production => "production",
		}
	}

	/// Resolve the webhook HMAC secret.
	///
	/// Development falls back to a fixed insecure secret so local testing
	/// works out of the box; other profiles must configure one.
	pub fn webhook_secret(&self) -> Result<SecretString, SettingsError> {
		match &self.webhook.secret {
			Some(value) => Ok(value.resolve_secret()?),
			None if self.environment.profile == EnvironmentProfile::Development => {
				Ok(SecretString::from("dev-webhook-secret"))
			},
			None => Err(SettingsError::MissingSecret {
				profile: self.profile_name(),
				setting: "webhook.secret",
			}),
		}
	}

	/// Resolve the transaction signing credential for the live adapter.
	pub fn sender_key(&self) -> Result<SecretString, SettingsError> {
		match &self.stacks.sender_key {
			Some(value) => Ok(value.resolve_secret()?),
			None => Err(SettingsError::MissingSecret {
				profile: self.profile_name(),
				setting: "stacks.sender_key",
			}),
		}
	}

	/// Startup validation: in non-development profiles every required
	/// secret must be present and resolvable, and an API key table must be
	/// configured.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.environment.profile == EnvironmentProfile::Development {
			return Ok(());
		}

		self.webhook_secret()?;

		if self.adapter.mode == AdapterMode::Live {
			self.sender_key()?;
		}

		if self.auth.api_keys.is_empty() {
			return Err(SettingsError::MissingSecret {
				profile: self.profile_name(),
				setting: "auth.api_keys",
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_development_mock() {
		let settings = Settings::default();
		assert_eq!(settings.environment.profile, EnvironmentProfile::Development);
		assert_eq!(settings.adapter.mode, AdapterMode::Mock);
		assert_eq!(settings.stacks.network, StacksNetwork::Devnet);
		assert_eq!(settings.bind_address(), "0.0.0.0:3000");
	}

	#[test]
	fn development_validates_without_secrets() {
		assert!(Settings::default().validate().is_ok());
	}

	#[test]
	fn production_requires_webhook_secret() {
		let mut settings = Settings::default();
		settings.environment.profile = EnvironmentProfile::Production;
		settings
			.auth
			.api_keys
			.insert("sk_live_x".into(), ApiKeyEntry { merchant: "M".into() });
		assert!(settings.validate().is_err());

		settings.webhook.secret = Some(ConfigurableValue::from_plain("prod-secret"));
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn production_live_adapter_requires_sender_key() {
		let mut settings = Settings::default();
		settings.environment.profile = EnvironmentProfile::Production;
		settings.adapter.mode = AdapterMode::Live;
		settings.webhook.secret = Some(ConfigurableValue::from_plain("prod-secret"));
		settings
			.auth
			.api_keys
			.insert("sk_live_x".into(), ApiKeyEntry { merchant: "M".into() });
		assert!(settings.validate().is_err());

		settings.stacks.sender_key = Some(ConfigurableValue::from_plain("key-material"));
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn production_requires_api_keys() {
		let mut settings = Settings::default();
		settings.environment.profile = EnvironmentProfile::Production;
		settings.webhook.secret = Some(ConfigurableValue::from_plain("prod-secret"));
		assert!(settings.validate().is_err());
	}

	#[test]
	fn network_default_endpoints() {
		assert!(StacksNetwork::Mainnet.default_api_url().contains("api.hiro.so"));
		assert!(StacksNetwork::Testnet.default_api_url().contains("testnet"));
		assert!(StacksNetwork::Devnet.default_api_url().contains("localhost"));
	}

	#[test]
	fn api_url_override_wins() {
		let mut stacks = StacksSettings::default();
		stacks.api_url = Some("http://node.internal:3999".into());
		assert_eq!(stacks.api_url(), "http://node.internal:3999");
	}
}
