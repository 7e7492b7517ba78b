//! Merchant operation errors.

use thiserror::Error;

use crate::adapters::AdapterError;

#[derive(Debug, Error)]
pub enum MerchantError {
	/// Request failed static validation; each entry names the violated field.
	#[error("validation failed")]
	Validation(Vec<String>),

	/// Registration attempted for an identity the ledger already knows.
	#[error("merchant {0} is already registered")]
	AlreadyRegistered(String),

	/// Lookup for an identity the ledger does not know.
	#[error("merchant {0} is not registered")]
	NotRegistered(String),

	/// A path identifier failed to parse.
	#[error("invalid identifier: {0}")]
	InvalidId(String),

	#[error("settlement failed: {0}")]
	Settlement(#[from] AdapterError),
}

impl MerchantError {
	/// Itemized violation list, when this is a validation failure.
	pub fn violations(&self) -> Option<&[String]> {
		match self {
			Self::Validation(details) => Some(details),
			_ => None,
		}
	}
}
