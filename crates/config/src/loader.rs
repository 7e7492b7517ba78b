//! Configuration loading.

use config::{Config, ConfigError, Environment, File};
use tracing::info;

use crate::settings::Settings;

/// Load settings from `config/config.*` (optional) with `SFLOW__`-prefixed
/// environment overrides, e.g. `SFLOW__STACKS__NETWORK=testnet`.
pub fn load_config() -> Result<Settings, ConfigError> {
	let source = Config::builder()
		.add_source(File::with_name("config/config").required(false))
		.add_source(Environment::with_prefix("SFLOW").separator("__"))
		.build()?;

	let settings: Settings = source.try_deserialize()?;

	info!(
		network = ?settings.stacks.network,
		contract = %format!("{}.{}", settings.stacks.contract_address, settings.stacks.contract_name),
		adapter = ?settings.adapter.mode,
		profile = ?settings.environment.profile,
		"configuration loaded"
	);

	Ok(settings)
}
