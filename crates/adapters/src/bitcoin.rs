//! Mock Bitcoin node backend.
//!
//! Fabricates confirmed transactions and inclusion proofs for well-formed
//! identifiers, mirroring the original mock node: any 64-hex txid exists
//! with six confirmations.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use sflow_types::adapters::{AdapterResult, BtcTransaction, InclusionProof};
use sflow_types::BitcoinNode;

const MOCK_BLOCK_HEIGHT: u64 = 800_000;

fn is_hex_256bit(s: &str) -> bool {
	s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[derive(Debug, Default)]
pub struct MockBitcoinNode;

impl MockBitcoinNode {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl BitcoinNode for MockBitcoinNode {
	async fn get_transaction(&self, txid: &str) -> AdapterResult<Option<BtcTransaction>> {
		if !is_hex_256bit(txid) {
			return Ok(None);
		}
		// Deterministic fabricated block hash so repeated lookups agree.
		let block_hash = hex::encode(Sha256::digest(txid.as_bytes()));
		Ok(Some(BtcTransaction {
			txid: txid.to_lowercase(),
			confirmations: 6,
			block_hash: Some(block_hash),
		}))
	}

	async fn verify_inclusion(
		&self,
		txid: &str,
		block_hash: &str,
	) -> AdapterResult<InclusionProof> {
		Ok(InclusionProof {
			included: is_hex_256bit(txid) && is_hex_256bit(block_hash),
			block_height: MOCK_BLOCK_HEIGHT,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn well_formed_txids_exist() {
		let node = MockBitcoinNode::new();
		let tx = node.get_transaction(&"ab".repeat(32)).await.unwrap();
		let tx = tx.unwrap();
		assert_eq!(tx.confirmations, 6);
		assert!(tx.block_hash.is_some());
	}

	#[tokio::test]
	async fn malformed_txids_do_not() {
		let node = MockBitcoinNode::new();
		assert!(node.get_transaction("nothex").await.unwrap().is_none());
		assert!(node.get_transaction("abcd").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn inclusion_requires_well_formed_inputs() {
		let node = MockBitcoinNode::new();
		let good = node
			.verify_inclusion(&"ab".repeat(32), &"cd".repeat(32))
			.await
			.unwrap();
		assert!(good.included);

		let bad = node
			.verify_inclusion(&"ab".repeat(32), "junk")
			.await
			.unwrap();
		assert!(!bad.included);
	}
}
