//! Authentication middleware.
//!
//! All non-public routes require `Authorization: Bearer <key>`; webhook
//! routes authenticate by HMAC signature instead and health is open, so
//! both are listed as public paths. Failures short-circuit before any
//! handler or adapter work.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use sflow_types::auth::{AuthenticationResult, Authenticator, RateLimits};

use super::rate_limit::MemoryRateLimiter;
use crate::response::ApiError;

/// Auth middleware configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Path prefixes that skip bearer authentication.
	pub public_paths: Vec<String>,
	pub enable_rate_limiting: bool,
	pub rate_limits: RateLimits,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			public_paths: vec!["/health".to_string(), "/webhooks".to_string()],
			enable_rate_limiting: false,
			rate_limits: RateLimits::default(),
		}
	}
}

/// Authenticate a request and attach the merchant context to its
/// extensions.
pub async fn auth_middleware<A>(
	authenticator: Arc<A>,
	rate_limiter: Arc<MemoryRateLimiter>,
	config: AuthConfig,
	mut request: Request,
	next: Next,
) -> Result<Response, ApiError>
where
	A: Authenticator,
{
	let path = request.uri().path().to_string();

	if config.public_paths.iter().any(|p| path.starts_with(p)) {
		return Ok(next.run(request).await);
	}

	let bearer = request
		.headers()
		.get(AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.strip_prefix("Bearer "));

	match authenticator.authenticate(bearer).await {
		AuthenticationResult::Authorized(context) => {
			if config.enable_rate_limiting
				&& !rate_limiter.check_and_record(&context.api_key, &config.rate_limits)
			{
				warn!(merchant = %context.name, %path, "rate limit exceeded");
				return Err(ApiError::too_many_requests());
			}

			request.extensions_mut().insert(context);
			Ok(next.run(request).await)
		},
		AuthenticationResult::Unauthorized(reason) => {
			warn!(%path, %reason, "authentication failed");
			Err(ApiError::unauthorized(reason))
		},
	}
}
