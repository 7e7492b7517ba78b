//! Payment orchestration errors.

use thiserror::Error;

use super::{PaymentMethod, PaymentStatus};
use crate::adapters::AdapterError;

#[derive(Debug, Error)]
pub enum PaymentError {
	/// Request failed static validation; each entry names the violated field.
	#[error("validation failed")]
	Validation(Vec<String>),

	/// The identifier is not 16 hex-encoded bytes.
	#[error("invalid payment id: {0}")]
	InvalidId(String),

	/// The method code is outside the defined enum.
	#[error("method must be 1 (sBTC), 2 (Lightning), 3 (BTC L1), or 4 (Liquid), got {0}")]
	InvalidMethod(u8),

	/// The intent does not exist on the ledger.
	#[error("payment intent {0} not found")]
	NotFound(String),

	/// The requested transition is illegal from the intent's current state.
	#[error("cannot {operation} a payment in state {current}")]
	StateConflict {
		operation: &'static str,
		current: PaymentStatus,
	},

	/// The settlement rail exists in the API but has no connected backend.
	#[error("settlement method {} is not supported yet", .0.as_u8())]
	NotSupported(PaymentMethod),

	/// The settlement adapter call failed; the intent is left in its
	/// last-known ledger state and the caller must re-query `status`.
	#[error("settlement failed: {0}")]
	Settlement(#[from] AdapterError),
}

impl PaymentError {
	/// Itemized violation list, when this is a validation failure.
	pub fn violations(&self) -> Option<&[String]> {
		match self {
			Self::Validation(details) => Some(details),
			_ => None,
		}
	}
}
