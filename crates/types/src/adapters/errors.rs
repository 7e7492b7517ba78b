//! Adapter error types.

use thiserror::Error;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Failure of an external-ledger or backend-node call.
///
/// Adapters never retry; callers decide retry policy. Read operations fail
/// with this type only on transport/parse problems, never on "not found".
#[derive(Debug, Error)]
pub enum AdapterError {
	/// The request never produced a usable response (connect, timeout, TLS).
	#[error("transport error: {0}")]
	Transport(String),

	/// The ledger answered and declined the transaction.
	#[error("ledger rejected the transaction: {0}")]
	Rejected(String),

	/// The response arrived but could not be parsed into a domain value.
	#[error("malformed ledger response: {0}")]
	MalformedResponse(String),

	/// The adapter cannot serve this operation at all.
	#[error("operation {operation} not supported by adapter {adapter}")]
	UnsupportedOperation { operation: String, adapter: String },

	/// The adapter was constructed with unusable configuration.
	#[error("adapter misconfigured: {0}")]
	Configuration(String),
}
