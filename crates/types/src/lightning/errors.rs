//! Lightning operation errors.

use thiserror::Error;

use crate::adapters::AdapterError;

#[derive(Debug, Error)]
pub enum LightningError {
	/// Request failed static validation; each entry names the violated field.
	#[error("validation failed")]
	Validation(Vec<String>),

	#[error("invalid lightning invoice")]
	InvalidInvoice,

	#[error("invalid payment hash format: {0}")]
	InvalidPaymentHash(String),

	#[error("payment {0} not found")]
	PaymentNotFound(String),

	/// The lightning node backend failed.
	#[error("lightning node error: {0}")]
	Node(#[from] AdapterError),

	/// The HTLC contract call failed.
	#[error("settlement failed: {0}")]
	Settlement(AdapterError),
}

impl LightningError {
	/// Itemized violation list, when this is a validation failure.
	pub fn violations(&self) -> Option<&[String]> {
		match self {
			Self::Validation(details) => Some(details),
			_ => None,
		}
	}
}
