//! Lightning orchestration: invoices, payments, HTLC settlement legs.
//!
//! Invoice plumbing goes to the Lightning node backend; HTLC lock, claim
//! and refund are contract operations on the settlement adapter.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use sflow_types::lightning::{
	CreateInvoiceRequest, DecodeInvoiceRequest, HtlcLock, HtlcLockRequest, HtlcRefundRequest,
	Invoice, InvoiceParams, LightningError, LightningPayment, LightningResult, PayInvoiceRequest,
	PreimagePair, SubmarineSwapRequest,
};
use sflow_types::lightning::HtlcClaimRequest;
use sflow_types::payments::PaymentId;
use sflow_types::validation::validate_htlc_lock;
use sflow_types::{LightningNode, SettlementAdapter, TxId};

fn is_hex_of_len(s: &str, chars: usize) -> bool {
	s.len() == chars && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[derive(Clone)]
pub struct LightningService {
	node: Arc<dyn LightningNode>,
	adapter: Arc<dyn SettlementAdapter>,
}

impl LightningService {
	pub fn new(node: Arc<dyn LightningNode>, adapter: Arc<dyn SettlementAdapter>) -> Self {
		Self { node, adapter }
	}

	pub async fn create_invoice(&self, request: &CreateInvoiceRequest) -> LightningResult<Invoice> {
		let amount_sats = request.amount_sats.unwrap_or(0);
		if amount_sats <= 0 {
			return Err(LightningError::Validation(vec![
				"amount_sats must be a positive number".to_string(),
			]));
		}

		let params = InvoiceParams {
			amount_msat: amount_sats as u64 * 1_000,
			description: request
				.description
				.clone()
				.unwrap_or_else(|| "SFlow Payment".to_string()),
			expiry_secs: request.expiry.unwrap_or(3_600).max(1) as u64,
		};

		let invoice = self.node.create_invoice(&params).await?;
		info!(payment_hash = %invoice.payment_hash, "lightning invoice created");
		Ok(invoice)
	}

	pub async fn decode_invoice(&self, request: &DecodeInvoiceRequest) -> LightningResult<Invoice> {
		let payment_request = request.payment_request.as_deref().unwrap_or("");
		if !self.node.validate_invoice(payment_request) {
			return Err(LightningError::InvalidInvoice);
		}
		Ok(self.node.decode_invoice(payment_request).await?)
	}

	pub async fn pay_invoice(&self, request: &PayInvoiceRequest) -> LightningResult<LightningPayment> {
		let payment_request = request
			.payment_request
			.as_deref()
			.filter(|s| !s.is_empty())
			.ok_or_else(|| {
				LightningError::Validation(vec!["payment_request is required".to_string()])
			})?;
		Ok(self.node.pay_invoice(payment_request).await?)
	}

	pub async fn payment_status(&self, payment_hash: &str) -> LightningResult<LightningPayment> {
		if !is_hex_of_len(payment_hash, 64) {
			return Err(LightningError::InvalidPaymentHash(payment_hash.to_string()));
		}
		self.node
			.payment_status(payment_hash)
			.await?
			.ok_or_else(|| LightningError::PaymentNotFound(payment_hash.to_string()))
	}

	/// Routing fee estimate in millisatoshis.
	pub fn estimate_routing_fee(&self, amount_msat: u64) -> u64 {
		self.node.estimate_routing_fee(amount_msat)
	}

	pub fn generate_preimage(&self) -> PreimagePair {
		self.node.generate_preimage()
	}

	/// Invoice for a submarine swap, committing to the swap's hash so the
	/// on-chain leg and the invoice settle against the same secret.
	pub async fn submarine_swap_invoice(
		&self,
		request: &SubmarineSwapRequest,
	) -> LightningResult<Invoice> {
		let mut violations = Vec::new();
		if request.amount_sats.unwrap_or(0) <= 0 {
			violations.push("amount_sats must be a positive number".to_string());
		}
		let swap_hash = request.swap_hash.as_deref().unwrap_or("");
		if !is_hex_of_len(swap_hash, 64) {
			violations.push("swap_hash must be a 32-byte hex string".to_string());
		}
		if !violations.is_empty() {
			return Err(LightningError::Validation(violations));
		}

		let expiry_blocks = request.expiry_blocks.unwrap_or(144).max(1) as u64;
		let params = InvoiceParams {
			amount_msat: request.amount_sats.unwrap_or_default() as u64 * 1_000,
			description: "submarine swap".to_string(),
			expiry_secs: expiry_blocks * 600,
		};

		let invoice = self.node.create_invoice(&params).await?;
		Ok(Invoice {
			payment_hash: swap_hash.to_string(),
			..invoice
		})
	}

	/// Lock funds on the contract against a preimage hash.
	pub async fn lock(&self, request: &HtlcLockRequest) -> LightningResult<(HtlcLock, TxId)> {
		let violations = validate_htlc_lock(request);
		if !violations.is_empty() {
			return Err(LightningError::Validation(violations));
		}

		let payment_id = PaymentId::from_hex(request.payment_id.as_deref().unwrap_or(""))
			.map_err(|_| {
				LightningError::Validation(vec!["payment_id must be 16 hex-encoded bytes".to_string()])
			})?;

		let lock = HtlcLock {
			payment_id,
			amount: request.amount.unwrap_or_default() as u64,
			preimage_hash: request
				.preimage_hash
				.clone()
				.unwrap_or_default()
				.to_lowercase(),
			timelock: request
				.timelock
				.unwrap_or_else(|| (Utc::now() + Duration::hours(1)).timestamp_millis()),
			recipient: request.recipient.clone().unwrap_or_default(),
		};

		let tx_id = self
			.adapter
			.lock_htlc(&lock)
			.await
			.map_err(LightningError::Settlement)?;
		info!(payment_id = %lock.payment_id, "htlc locked");
		Ok((lock, tx_id))
	}

	/// Release a lock by revealing its preimage.
	pub async fn claim(&self, request: &HtlcClaimRequest) -> LightningResult<TxId> {
		let preimage = request
			.preimage
			.as_deref()
			.filter(|s| !s.is_empty())
			.ok_or_else(|| LightningError::Validation(vec!["preimage is required".to_string()]))?;
		self.adapter
			.claim_htlc(preimage)
			.await
			.map_err(LightningError::Settlement)
	}

	/// Refund an expired lock by its preimage hash.
	pub async fn refund(&self, request: &HtlcRefundRequest) -> LightningResult<TxId> {
		let preimage_hash = request
			.preimage_hash
			.as_deref()
			.filter(|s| !s.is_empty())
			.ok_or_else(|| {
				LightningError::Validation(vec!["preimage_hash is required".to_string()])
			})?;
		self.adapter
			.refund_htlc(preimage_hash)
			.await
			.map_err(LightningError::Settlement)
	}
}

#[cfg(test)]
mod tests {
	use sflow_adapters::{MockAdapter, MockLightningNode};

	use super::*;

	fn service() -> LightningService {
		LightningService::new(
			Arc::new(MockLightningNode::new()),
			Arc::new(MockAdapter::new()),
		)
	}

	#[tokio::test]
	async fn invoice_requires_positive_amount() {
		let service = service();
		let err = service
			.create_invoice(&CreateInvoiceRequest::default())
			.await
			.unwrap_err();
		assert!(err.violations().is_some());
	}

	#[tokio::test]
	async fn invoice_create_and_decode() {
		let service = service();
		let invoice = service
			.create_invoice(&CreateInvoiceRequest {
				amount_sats: Some(100_000),
				description: Some("order 42".into()),
				expiry: None,
			})
			.await
			.unwrap();
		assert_eq!(invoice.amount_msat, 100_000_000);

		let decoded = service
			.decode_invoice(&DecodeInvoiceRequest {
				payment_request: Some(invoice.payment_request.clone()),
			})
			.await
			.unwrap();
		assert_eq!(decoded.payment_hash, invoice.payment_hash);
	}

	#[tokio::test]
	async fn decode_rejects_malformed_invoices() {
		let service = service();
		let err = service
			.decode_invoice(&DecodeInvoiceRequest {
				payment_request: Some("definitely-not-an-invoice".into()),
			})
			.await
			.unwrap_err();
		assert!(matches!(err, LightningError::InvalidInvoice));
	}

	#[tokio::test]
	async fn payment_status_validates_hash_shape() {
		let service = service();
		let err = service.payment_status("xyz").await.unwrap_err();
		assert!(matches!(err, LightningError::InvalidPaymentHash(_)));

		let err = service.payment_status(&"ab".repeat(32)).await.unwrap_err();
		assert!(matches!(err, LightningError::PaymentNotFound(_)));
	}

	#[tokio::test]
	async fn htlc_lock_claim_round_trip() {
		let service = service();
		let pair = service.generate_preimage();

		let (lock, _tx) = service
			.lock(&HtlcLockRequest {
				payment_id: Some(PaymentId::generate().to_string()),
				amount: Some(25_000),
				preimage_hash: Some(pair.hash.clone()),
				timelock: None,
				recipient: Some("ST1RECIPIENT".into()),
			})
			.await
			.unwrap();
		assert_eq!(lock.preimage_hash, pair.hash);

		service
			.claim(&HtlcClaimRequest {
				preimage: Some(pair.preimage),
			})
			.await
			.unwrap();
	}

	#[tokio::test]
	async fn htlc_refund_requires_existing_lock() {
		let service = service();
		let err = service
			.refund(&HtlcRefundRequest {
				preimage_hash: Some("ab".repeat(32)),
			})
			.await
			.unwrap_err();
		assert!(matches!(err, LightningError::Settlement(_)));
	}

	#[tokio::test]
	async fn submarine_swap_commits_to_swap_hash() {
		let service = service();
		let swap_hash = "cd".repeat(32);
		let invoice = service
			.submarine_swap_invoice(&SubmarineSwapRequest {
				amount_sats: Some(40_000),
				swap_hash: Some(swap_hash.clone()),
				expiry_blocks: Some(144),
			})
			.await
			.unwrap();
		assert_eq!(invoice.payment_hash, swap_hash);
	}
}
