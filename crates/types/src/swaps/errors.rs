//! Swap operation errors.

use thiserror::Error;

use crate::adapters::AdapterError;

#[derive(Debug, Error)]
pub enum SwapError {
	/// Request failed static validation; each entry names the violated field.
	#[error("validation failed")]
	Validation(Vec<String>),

	/// The identifier is not 32 hex-encoded bytes.
	#[error("invalid swap id: {0}")]
	InvalidId(String),

	/// The funding transaction is unknown to the Bitcoin backend.
	#[error("bitcoin transaction {0} not found")]
	BtcTxNotFound(String),

	/// The presented inclusion proof did not verify.
	#[error("invalid bitcoin transaction proof")]
	InvalidProof,

	#[error("atomic swap {0} not found")]
	NotFound(String),

	/// No exchange rate is configured for the currency pair.
	#[error("unsupported currency pair {from}/{to}")]
	UnsupportedPair { from: String, to: String },

	/// The Bitcoin backend failed.
	#[error("bitcoin backend error: {0}")]
	Bitcoin(AdapterError),

	#[error("settlement failed: {0}")]
	Settlement(#[from] AdapterError),
}

impl SwapError {
	/// Itemized violation list, when this is a validation failure.
	pub fn violations(&self) -> Option<&[String]> {
		match self {
			Self::Validation(details) => Some(details),
			_ => None,
		}
	}
}
