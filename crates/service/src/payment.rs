//! Payment intent orchestrator.
//!
//! Owns the lifecycle state machine from creation through terminal state,
//! delegating every transition to the settlement adapter. The ledger is the
//! source of truth: the current status is read back from the adapter before
//! any write, the transition's legality is checked against the state
//! machine, and only an adapter-confirmed write updates what the caller
//! sees. Nothing is retried, and two concurrent transitions on the same id
//! may both reach the adapter — the ledger's at-most-once enforcement is
//! what serializes them.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use sflow_types::payments::{
	CreatePaymentIntentRequest, PaymentError, PaymentId, PaymentIntent, PaymentMethod,
	PaymentResult, PaymentStatus, TransitionReceipt,
};
use sflow_types::constants::limits::DEFAULT_EXPIRY_BLOCKS;
use sflow_types::validation::{validate_payment_intent, AmountLimits};
use sflow_types::{SettlementAdapter, TxId};

#[derive(Clone)]
pub struct PaymentService {
	adapter: Arc<dyn SettlementAdapter>,
	limits: AmountLimits,
}

impl PaymentService {
	pub fn new(adapter: Arc<dyn SettlementAdapter>, limits: AmountLimits) -> Self {
		Self { adapter, limits }
	}

	/// Capability lookup for a settlement method.
	///
	/// Only sBTC is wired to the settlement adapter; the other rails report
	/// an explicit not-supported result rather than failing generically.
	fn settlement_for(&self, method: PaymentMethod) -> PaymentResult<&Arc<dyn SettlementAdapter>> {
		match method {
			PaymentMethod::Sbtc => Ok(&self.adapter),
			unsupported => Err(PaymentError::NotSupported(unsupported)),
		}
	}

	/// Validate, delegate creation to the ledger, and return the `PENDING`
	/// intent carrying the adapter's transaction reference.
	///
	/// On adapter failure no local state changes — there is none to roll
	/// back.
	pub async fn create(&self, request: &CreatePaymentIntentRequest) -> PaymentResult<PaymentIntent> {
		let violations = validate_payment_intent(request, &self.limits);
		if !violations.is_empty() {
			return Err(PaymentError::Validation(violations));
		}

		// Bounds were just validated, so the unwraps below cannot be reached
		// with absent values.
		let method = PaymentMethod::try_from(request.method.unwrap_or_default() as u8)?;
		let expires_in_blocks = request
			.expires_in_blocks
			.unwrap_or(DEFAULT_EXPIRY_BLOCKS as i64) as u32;

		let mut intent = PaymentIntent::new(
			request.merchant.clone().unwrap_or_default(),
			request.amount.unwrap_or_default() as u64,
			request.currency.clone().unwrap_or_default(),
			method,
			expires_in_blocks,
			request.metadata.clone().unwrap_or_default(),
		);

		let adapter = self.settlement_for(method)?;
		let tx_id = adapter.create_payment_intent(&intent).await?;
		intent.tx_id = Some(tx_id);

		info!(id = %intent.id, merchant = %intent.merchant, amount = intent.amount, "payment intent created");
		Ok(intent)
	}

	/// Move `PENDING` → `CONFIRMED`.
	///
	/// On adapter failure the intent remains `PENDING` on the ledger and the
	/// error surfaces to the caller; there is no implicit retry.
	pub async fn process(&self, id: &PaymentId) -> PaymentResult<TransitionReceipt> {
		self.require_state(id, "process", PaymentStatus::Pending).await?;
		let tx_id = self.adapter.process_payment(id).await?;
		Ok(self.receipt(id, PaymentStatus::Confirmed, tx_id))
	}

	/// Move `CONFIRMED` → `COMPLETED`.
	pub async fn complete(&self, id: &PaymentId) -> PaymentResult<TransitionReceipt> {
		self.require_state(id, "complete", PaymentStatus::Confirmed).await?;
		let tx_id = self.adapter.complete_payment(id).await?;
		Ok(self.receipt(id, PaymentStatus::Completed, tx_id))
	}

	/// Move `PENDING` → `CANCELLED`.
	pub async fn cancel(&self, id: &PaymentId) -> PaymentResult<TransitionReceipt> {
		self.require_state(id, "cancel", PaymentStatus::Pending).await?;
		let tx_id = self.adapter.cancel_payment(id).await?;
		Ok(self.receipt(id, PaymentStatus::Cancelled, tx_id))
	}

	/// Read the ledger's current status and refuse the operation unless the
	/// intent sits in `required`. Two concurrent callers may both pass this
	/// gate; the ledger itself rejects the second write.
	async fn require_state(
		&self,
		id: &PaymentId,
		operation: &'static str,
		required: PaymentStatus,
	) -> PaymentResult<()> {
		let current = self.status(id).await?;
		if current != required {
			debug!(%id, %current, operation, "transition refused");
			return Err(PaymentError::StateConflict { operation, current });
		}
		Ok(())
	}

	fn receipt(&self, id: &PaymentId, status: PaymentStatus, tx_id: TxId) -> TransitionReceipt {
		info!(%id, %status, "payment transition confirmed");
		TransitionReceipt {
			payment_id: *id,
			status,
			tx_id,
			occurred_at: Utc::now(),
		}
	}

	/// Current status straight from the ledger — this layer holds no cache.
	pub async fn status(&self, id: &PaymentId) -> PaymentResult<PaymentStatus> {
		match self.adapter.get_payment_status(id).await? {
			Some(code) => Ok(PaymentStatus::from_code(code)),
			None => Err(PaymentError::NotFound(id.to_string())),
		}
	}

	/// Fetch the full intent record; `None` when the ledger does not know
	/// the id.
	pub async fn get(&self, id: &PaymentId) -> PaymentResult<Option<PaymentIntent>> {
		let intent = self.adapter.get_payment_intent(id).await?;
		Ok(intent.map(|mut intent| {
			intent.status = intent.effective_status(Utc::now());
			intent
		}))
	}

	/// Protocol fee breakdown for an amount.
	pub fn calculate_fees(&self, amount: u64) -> FeeBreakdown {
		let protocol_fee = amount * PROTOCOL_FEE_BPS / 10_000;
		FeeBreakdown {
			amount,
			protocol_fee,
			net_amount: amount - protocol_fee,
		}
	}
}

/// Protocol fee taken on settlement, in basis points.
const PROTOCOL_FEE_BPS: u64 = 100;

/// Fee breakdown for a prospective payment.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FeeBreakdown {
	pub amount: u64,
	pub protocol_fee: u64,
	pub net_amount: u64,
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use sflow_adapters::MockAdapter;

	use super::*;

	fn service() -> PaymentService {
		PaymentService::new(Arc::new(MockAdapter::new()), AmountLimits::default())
	}

	fn request(method: i64) -> CreatePaymentIntentRequest {
		CreatePaymentIntentRequest {
			merchant: Some("ST1MERCHANT".into()),
			amount: Some(100_000),
			currency: Some("BTC".into()),
			method: Some(method),
			expires_in_blocks: Some(144),
			metadata: Some(HashMap::new()),
		}
	}

	#[tokio::test]
	async fn create_returns_pending_with_tx_reference() {
		let service = service();
		let intent = service.create(&request(1)).await.unwrap();
		assert_eq!(intent.status, PaymentStatus::Pending);
		assert!(intent.tx_id.is_some());
	}

	#[tokio::test]
	async fn create_rejects_out_of_range_amounts() {
		let service = service();
		let mut bad = request(1);
		bad.amount = Some(999);
		let err = service.create(&bad).await.unwrap_err();
		assert!(err.violations().is_some_and(|v| !v.is_empty()));
	}

	#[tokio::test]
	async fn unwired_methods_report_not_supported() {
		let service = service();
		for method in [2, 3, 4] {
			let err = service.create(&request(method)).await.unwrap_err();
			assert!(matches!(err, PaymentError::NotSupported(_)), "method {method}");
		}
	}

	#[tokio::test]
	async fn lifecycle_round_trip() {
		let service = service();
		let intent = service.create(&request(1)).await.unwrap();

		let receipt = service.process(&intent.id).await.unwrap();
		assert_eq!(receipt.status, PaymentStatus::Confirmed);
		assert_eq!(service.status(&intent.id).await.unwrap(), PaymentStatus::Confirmed);

		let receipt = service.complete(&intent.id).await.unwrap();
		assert_eq!(receipt.status, PaymentStatus::Completed);
		assert_eq!(service.status(&intent.id).await.unwrap(), PaymentStatus::Completed);
	}

	#[tokio::test]
	async fn complete_never_succeeds_from_pending() {
		let service = service();
		let intent = service.create(&request(1)).await.unwrap();

		let err = service.complete(&intent.id).await.unwrap_err();
		assert!(matches!(
			err,
			PaymentError::StateConflict {
				operation: "complete",
				current: PaymentStatus::Pending,
			}
		));
		// The refused transition had no side effect.
		assert_eq!(service.status(&intent.id).await.unwrap(), PaymentStatus::Pending);
	}

	#[tokio::test]
	async fn cancel_only_from_pending() {
		let service = service();
		let intent = service.create(&request(1)).await.unwrap();
		service.process(&intent.id).await.unwrap();

		let err = service.cancel(&intent.id).await.unwrap_err();
		assert!(matches!(err, PaymentError::StateConflict { .. }));
	}

	#[tokio::test]
	async fn cancelled_intent_reads_cancelled_from_record() {
		let service = service();
		let intent = service.create(&request(1)).await.unwrap();
		service.cancel(&intent.id).await.unwrap();

		let fetched = service.get(&intent.id).await.unwrap().unwrap();
		assert_eq!(fetched.status, PaymentStatus::Cancelled);
		// The contract status word has no cancelled code, so the status
		// query reports the unmapped-code sentinel.
		assert_eq!(service.status(&intent.id).await.unwrap(), PaymentStatus::Unknown);
	}

	#[test]
	fn fee_breakdown_is_one_percent() {
		let service = service();
		let fees = service.calculate_fees(100_000);
		assert_eq!(fees.protocol_fee, 1_000);
		assert_eq!(fees.net_amount, 99_000);
	}

	#[tokio::test]
	async fn unknown_id_is_not_found() {
		let service = service();
		let err = service.status(&PaymentId::generate()).await.unwrap_err();
		assert!(matches!(err, PaymentError::NotFound(_)));
		assert!(service.get(&PaymentId::generate()).await.unwrap().is_none());
	}
}
