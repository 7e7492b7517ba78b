//! Authentication errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
	#[error("missing or invalid authorization header")]
	MissingCredential,

	#[error("invalid API key")]
	InvalidCredential,

	#[error("rate limit exceeded")]
	RateLimited,
}
