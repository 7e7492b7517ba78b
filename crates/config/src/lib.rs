//! Configuration for the sflow payment gateway.
//!
//! Settings load from `config/config.*` plus `SFLOW__`-prefixed environment
//! overrides. Secrets are declared as [`ConfigurableValue`]s so deployments
//! can point at environment variables instead of embedding material in
//! files; startup validation rejects non-development profiles with missing
//! secrets.

pub mod configurable_value;
pub mod loader;
pub mod settings;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::load_config;
pub use settings::{
	AdapterMode, ApiKeyEntry, EnvironmentProfile, Settings, SettingsError, StacksNetwork,
};
