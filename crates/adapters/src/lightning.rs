//! Mock Lightning node backend.
//!
//! Fabricates invoices and payments with internally consistent hashes so
//! the lightning surface can be exercised without a node.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sha2::{Digest, Sha256};

use sflow_types::adapters::AdapterResult;
use sflow_types::lightning::{
	Invoice, InvoiceParams, LightningPayment, LightningPaymentStatus, PreimagePair,
};
use sflow_types::LightningNode;

const BASE_FEE_MSAT: u64 = 1_000;

#[derive(Debug, Default)]
pub struct MockLightningNode {
	/// Issued invoices keyed by payment request.
	invoices: DashMap<String, Invoice>,
	/// Preimages for issued invoices, keyed by payment hash.
	preimages: DashMap<String, String>,
	/// Settled payments keyed by payment hash.
	payments: DashMap<String, LightningPayment>,
}

impl MockLightningNode {
	pub fn new() -> Self {
		Self::default()
	}

	fn fabricate_decoded(&self, payment_request: &str) -> Invoice {
		// Unknown but well-formed invoices decode to a fixed shape, the way
		// the original mock node behaved.
		let hash = hex::encode(Sha256::digest(payment_request.as_bytes()));
		Invoice {
			payment_request: payment_request.to_string(),
			payment_hash: hash,
			amount_msat: 100_000_000,
			description: "Test payment".to_string(),
			expiry_secs: 3_600,
			created_at: Utc::now(),
		}
	}
}

#[async_trait]
impl LightningNode for MockLightningNode {
	async fn create_invoice(&self, params: &InvoiceParams) -> AdapterResult<Invoice> {
		let pair = self.generate_preimage();
		let payment_request = format!(
			"lnbc{}n1{}",
			params.amount_msat / 1_000,
			&pair.hash[..24]
		);
		let invoice = Invoice {
			payment_request: payment_request.clone(),
			payment_hash: pair.hash.clone(),
			amount_msat: params.amount_msat,
			description: params.description.clone(),
			expiry_secs: params.expiry_secs,
			created_at: Utc::now(),
		};
		self.invoices.insert(payment_request, invoice.clone());
		self.preimages.insert(pair.hash, pair.preimage);
		Ok(invoice)
	}

	async fn decode_invoice(&self, payment_request: &str) -> AdapterResult<Invoice> {
		Ok(self
			.invoices
			.get(payment_request)
			.map(|entry| entry.clone())
			.unwrap_or_else(|| self.fabricate_decoded(payment_request)))
	}

	async fn pay_invoice(&self, payment_request: &str) -> AdapterResult<LightningPayment> {
		let decoded = self.decode_invoice(payment_request).await?;
		let preimage = self
			.preimages
			.get(&decoded.payment_hash)
			.map(|entry| entry.clone())
			.unwrap_or_else(|| self.generate_preimage().preimage);

		let now = Utc::now();
		let payment = LightningPayment {
			payment_hash: decoded.payment_hash.clone(),
			payment_preimage: Some(preimage),
			amount_msat: decoded.amount_msat,
			fee_msat: self.estimate_routing_fee(decoded.amount_msat),
			status: LightningPaymentStatus::Succeeded,
			created_at: now,
			settled_at: Some(now),
		};
		self.payments
			.insert(decoded.payment_hash, payment.clone());
		Ok(payment)
	}

	async fn payment_status(&self, payment_hash: &str) -> AdapterResult<Option<LightningPayment>> {
		Ok(self.payments.get(payment_hash).map(|entry| entry.clone()))
	}

	fn estimate_routing_fee(&self, amount_msat: u64) -> u64 {
		// Base fee plus 0.1%, whichever is larger.
		BASE_FEE_MSAT.max(amount_msat / 1_000)
	}

	fn generate_preimage(&self) -> PreimagePair {
		let preimage: [u8; 32] = rand::random();
		let hash = Sha256::digest(preimage);
		PreimagePair {
			preimage: hex::encode(preimage),
			hash: hex::encode(hash),
		}
	}

	fn validate_invoice(&self, payment_request: &str) -> bool {
		let lowered = payment_request.to_ascii_lowercase();
		["lnbc", "lntb", "lnbcrt"]
			.iter()
			.any(|prefix| lowered.starts_with(prefix))
			&& lowered
				.chars()
				.all(|c| c.is_ascii_alphanumeric())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn invoice_round_trip() {
		let node = MockLightningNode::new();
		let invoice = node
			.create_invoice(&InvoiceParams {
				amount_msat: 50_000_000,
				description: "coffee".into(),
				expiry_secs: 3_600,
			})
			.await
			.unwrap();

		assert!(node.validate_invoice(&invoice.payment_request));

		let decoded = node.decode_invoice(&invoice.payment_request).await.unwrap();
		assert_eq!(decoded.payment_hash, invoice.payment_hash);
		assert_eq!(decoded.amount_msat, 50_000_000);
		assert_eq!(decoded.description, "coffee");
	}

	#[tokio::test]
	async fn paying_reveals_the_invoice_preimage() {
		let node = MockLightningNode::new();
		let invoice = node
			.create_invoice(&InvoiceParams {
				amount_msat: 10_000_000,
				description: "x".into(),
				expiry_secs: 600,
			})
			.await
			.unwrap();

		let payment = node.pay_invoice(&invoice.payment_request).await.unwrap();
		assert_eq!(payment.status, LightningPaymentStatus::Succeeded);

		// The preimage must hash to the invoice's payment hash.
		let preimage = hex::decode(payment.payment_preimage.unwrap()).unwrap();
		assert_eq!(hex::encode(Sha256::digest(preimage)), invoice.payment_hash);

		let status = node.payment_status(&payment.payment_hash).await.unwrap();
		assert!(status.is_some());
	}

	#[tokio::test]
	async fn unknown_payment_hash_is_none() {
		let node = MockLightningNode::new();
		assert!(node.payment_status(&"ab".repeat(32)).await.unwrap().is_none());
	}

	#[test]
	fn preimage_hash_consistency() {
		let node = MockLightningNode::new();
		let pair = node.generate_preimage();
		let bytes = hex::decode(&pair.preimage).unwrap();
		assert_eq!(hex::encode(Sha256::digest(bytes)), pair.hash);
	}

	#[test]
	fn fee_estimate_floor_and_rate() {
		let node = MockLightningNode::new();
		assert_eq!(node.estimate_routing_fee(100_000), 1_000); // floor
		assert_eq!(node.estimate_routing_fee(100_000_000), 100_000); // 0.1%
	}

	#[test]
	fn invoice_validation() {
		let node = MockLightningNode::new();
		assert!(node.validate_invoice("lnbc100n1abcdef"));
		assert!(node.validate_invoice("lntb100n1abcdef"));
		assert!(!node.validate_invoice("bc1qnotaninvoice"));
		assert!(!node.validate_invoice("lnbc with spaces"));
	}
}
