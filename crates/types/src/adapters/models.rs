//! Adapter data models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque settlement transaction reference returned by write operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxId(pub String);

impl TxId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for TxId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for TxId {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// A Bitcoin transaction as reported by the Bitcoin backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BtcTransaction {
	pub txid: String,
	pub confirmations: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub block_hash: Option<String>,
}

/// Result of checking a transaction's inclusion in a block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InclusionProof {
	pub included: bool,
	pub block_height: u64,
}
