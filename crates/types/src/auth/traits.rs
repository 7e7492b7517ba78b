//! Authenticator trait and merchant request context.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What an authenticated credential is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
	Read,
	Write,
	Admin,
}

/// Identity attached to a request after successful credential lookup.
///
/// The backing credential table is static at runtime; contexts are cheap
/// clones handed to handlers through request extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantContext {
	/// The bearer credential itself, doubling as the merchant identity in
	/// this deployment.
	pub api_key: String,
	/// Display name from the credential table.
	pub name: String,
	pub permissions: Vec<Permission>,
	pub created_at: DateTime<Utc>,
}

impl MerchantContext {
	pub fn new(api_key: String, name: String) -> Self {
		Self {
			api_key,
			name,
			permissions: vec![Permission::Read, Permission::Write],
			created_at: Utc::now(),
		}
	}

	pub fn has_permission(&self, permission: Permission) -> bool {
		self.permissions.contains(&permission) || self.permissions.contains(&Permission::Admin)
	}
}

/// Outcome of a credential lookup.
#[derive(Debug, Clone)]
pub enum AuthenticationResult {
	Authorized(MerchantContext),
	Unauthorized(String),
}

/// Credential-to-merchant lookup.
///
/// Implementations must be pure lookups against read-only state; rejection
/// has no side effect.
#[async_trait]
pub trait Authenticator: Send + Sync + Debug {
	/// Resolve a bearer credential (the token after `Bearer `) to a merchant
	/// context.
	async fn authenticate(&self, bearer: Option<&str>) -> AuthenticationResult;

	/// Human-readable name for logs.
	fn name(&self) -> &str;
}

/// Per-credential rate limiting configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimits {
	pub requests_per_minute: u32,
}

impl Default for RateLimits {
	fn default() -> Self {
		Self {
			requests_per_minute: 100,
		}
	}
}
