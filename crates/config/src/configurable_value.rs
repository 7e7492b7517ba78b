//! Values that resolve from the environment or from plain config text.

use std::fmt;

use serde::{Deserialize, Serialize};
use sflow_types::SecretString;

/// A config value that is either an environment-variable reference or a
/// plain inline value.
///
/// Secrets should use the `env` form; the `plain` form exists for local
/// development and is flagged as insecure in logs.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConfigurableValue {
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Environment variable name for `env`, the literal value for `plain`.
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: name.to_string(),
		}
	}

	pub fn from_plain(value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: value.to_string(),
		}
	}

	/// Resolve to the actual value.
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value)
				.map_err(|_| ConfigurableValueError::EnvVarNotFound(self.value.clone())),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve into a [`SecretString`] for secret material.
	pub fn resolve_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		Ok(SecretString::new(self.resolve()?))
	}

	pub fn is_insecure(&self) -> bool {
		self.value_type == ValueType::Plain
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("environment variable '{0}' not found")]
	EnvVarNotFound(String),
}

// Never echo plain values into logs.
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		// "env:NAME" strings read as environment references.
		match value.strip_prefix("env:") {
			Some(name) => Self::from_env(name),
			None => Self::from_plain(value),
		}
	}
}
