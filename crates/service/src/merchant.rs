//! Merchant orchestration: registration, subscriptions, yield, multi-sig.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use sflow_types::constants::limits::{BLOCKS_PER_YEAR, DEFAULT_SUBSCRIPTION_INTERVAL_BLOCKS};
use sflow_types::merchants::{
	CreateMultiSigTxRequest, CreateSubscriptionRequest, CreateYieldPositionRequest, Merchant,
	MerchantError, MerchantRegistration, MerchantResult, MerchantStats, MultiSigTransaction,
	RegisterMerchantRequest, Subscription, YieldPosition,
};
use sflow_types::validation::{validate_merchant_registration, validate_multisig_tx};
use sflow_types::SettlementAdapter;

/// Annualized yield assumed by estimates, in percent.
const ESTIMATE_APY_PERCENT: u64 = 5;

/// Outcome of charging a subscription.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionCharge {
	pub subscription_id: String,
	pub processed_at: DateTime<Utc>,
	pub next_payment: DateTime<Utc>,
}

/// Projected return for a deposit over a duration.
#[derive(Debug, Clone, Serialize)]
pub struct YieldEstimate {
	pub amount: u64,
	pub duration_blocks: u64,
	pub estimated_yield: u64,
	pub apy: String,
}

/// Outcome of adding a signature to a multi-sig proposal.
#[derive(Debug, Clone, Serialize)]
pub struct MultiSigSignature {
	pub tx_id: String,
	pub signer: String,
	pub contract_tx_id: String,
	pub signed_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MerchantService {
	adapter: Arc<dyn SettlementAdapter>,
}

impl MerchantService {
	pub fn new(adapter: Arc<dyn SettlementAdapter>) -> Self {
		Self { adapter }
	}

	/// Register a merchant identity on the ledger.
	///
	/// The ledger owns the idempotency boundary; the pre-check here just
	/// turns the second attempt into a polite conflict instead of a
	/// settlement error.
	pub async fn register(
		&self,
		merchant: &str,
		request: &RegisterMerchantRequest,
	) -> MerchantResult<Merchant> {
		let violations = validate_merchant_registration(request);
		if !violations.is_empty() {
			return Err(MerchantError::Validation(violations));
		}

		if self.adapter.is_merchant_registered(merchant).await? {
			return Err(MerchantError::AlreadyRegistered(merchant.to_string()));
		}

		let registration = MerchantRegistration {
			fee_destination: request.fee_destination.clone().unwrap_or_default(),
			yield_enabled: request.yield_enabled.unwrap_or(false),
			yield_percentage: request.yield_percentage.unwrap_or(0).max(0) as u64,
			multi_sig_enabled: request.multi_sig_enabled.unwrap_or(false),
			required_signatures: request.required_signatures.unwrap_or(1).max(1) as u64,
		};

		let tx_id = self.adapter.register_merchant(merchant, &registration).await?;
		info!(%merchant, "merchant registered");

		Ok(Merchant {
			merchant: merchant.to_string(),
			registration,
			registered_at: Utc::now(),
			tx_id: Some(tx_id),
		})
	}

	/// Whether the ledger knows this merchant identity.
	pub async fn is_registered(&self, address: &str) -> MerchantResult<bool> {
		Ok(self.adapter.is_merchant_registered(address).await?)
	}

	/// Like [`is_registered`](Self::is_registered) but failing with
	/// `NotRegistered` for absent identities, for 404-mapping callers.
	pub async fn require_registered(&self, address: &str) -> MerchantResult<()> {
		if self.is_registered(address).await? {
			Ok(())
		} else {
			Err(MerchantError::NotRegistered(address.to_string()))
		}
	}

	/// Aggregate statistics for a registered merchant.
	// TODO: read real volume counters from the contract once it exposes them;
	// until then this reports the empty baseline.
	pub async fn stats(&self, address: &str) -> MerchantResult<MerchantStats> {
		self.require_registered(address).await?;
		Ok(MerchantStats {
			merchant: address.to_string(),
			total_volume: 0,
			active_payments: 0,
			success_rate: 100,
			yield_earned: 0,
		})
	}

	/// Create a recurring billing agreement on the ledger.
	pub async fn create_subscription(
		&self,
		merchant: &str,
		request: &CreateSubscriptionRequest,
	) -> MerchantResult<Subscription> {
		let mut violations = Vec::new();
		if request.customer.as_deref().unwrap_or("").is_empty() {
			violations.push("customer is required".to_string());
		}
		if request.amount.unwrap_or(0) <= 0 {
			violations.push("amount must be a positive number".to_string());
		}
		if !violations.is_empty() {
			return Err(MerchantError::Validation(violations));
		}

		let interval_blocks = request
			.interval_blocks
			.unwrap_or(DEFAULT_SUBSCRIPTION_INTERVAL_BLOCKS as i64)
			.max(1) as u32;

		let mut subscription = Subscription::new(
			merchant.to_string(),
			request.customer.clone().unwrap_or_default(),
			request.amount.unwrap_or_default() as u64,
			interval_blocks,
		);

		subscription.tx_id = Some(self.adapter.create_subscription(&subscription).await?);
		info!(%merchant, subscription = %subscription.subscription_id, "subscription created");
		Ok(subscription)
	}

	/// Charge a subscription now and schedule the next billing point.
	pub async fn process_subscription(&self, subscription_id: &str) -> MerchantResult<SubscriptionCharge> {
		if subscription_id.is_empty() || !subscription_id.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(MerchantError::InvalidId(subscription_id.to_string()));
		}

		let processed_at = Utc::now();
		Ok(SubscriptionCharge {
			subscription_id: subscription_id.to_string(),
			processed_at,
			next_payment: processed_at + Duration::hours(24),
		})
	}

	/// Deploy merchant funds into a yield strategy.
	pub async fn create_yield_position(
		&self,
		request: &CreateYieldPositionRequest,
	) -> MerchantResult<YieldPosition> {
		let mut violations = Vec::new();
		if request.merchant.as_deref().unwrap_or("").is_empty() {
			violations.push("merchant is required".to_string());
		}
		if request.amount.unwrap_or(0) <= 0 {
			violations.push("amount must be a positive number".to_string());
		}
		if !violations.is_empty() {
			return Err(MerchantError::Validation(violations));
		}

		Ok(YieldPosition {
			position_id: sflow_types::models::ids::hex_id_16(),
			merchant: request.merchant.clone().unwrap_or_default(),
			amount: request.amount.unwrap_or_default() as u64,
			strategy: request.strategy.clone().unwrap_or_else(|| "STACKING".to_string()),
			duration_blocks: request.duration_blocks.unwrap_or(2_016).max(1) as u32,
			expected_apy: "8.5".to_string(),
			status: "active".to_string(),
			created_at: Utc::now(),
		})
	}

	/// Linear yield projection at the assumed APY.
	pub fn estimate_yield(&self, amount: u64, duration_blocks: u64) -> MerchantResult<YieldEstimate> {
		if amount == 0 || duration_blocks == 0 {
			return Err(MerchantError::Validation(vec![
				"amount and duration must be positive".to_string(),
			]));
		}

		let estimated_yield =
			amount * duration_blocks * ESTIMATE_APY_PERCENT / (BLOCKS_PER_YEAR * 100);
		let apy = (estimated_yield as f64 / amount as f64)
			* (BLOCKS_PER_YEAR as f64 / duration_blocks as f64)
			* 100.0;

		Ok(YieldEstimate {
			amount,
			duration_blocks,
			estimated_yield,
			apy: format!("{apy:.2}%"),
		})
	}

	/// Propose a multi-sig spend on the ledger.
	pub async fn create_multisig_tx(
		&self,
		merchant: &str,
		request: &CreateMultiSigTxRequest,
	) -> MerchantResult<MultiSigTransaction> {
		let violations = validate_multisig_tx(request);
		if !violations.is_empty() {
			return Err(MerchantError::Validation(violations));
		}

		let mut tx = MultiSigTransaction::new(
			merchant.to_string(),
			request.amount.unwrap_or_default() as u64,
			request.destination.clone().unwrap_or_default(),
		);

		tx.contract_tx_id = Some(
			self.adapter
				.create_multisig_tx(&tx.tx_id, tx.amount, &tx.destination)
				.await?,
		);
		Ok(tx)
	}

	/// Add the caller's signature to a pending multi-sig proposal.
	pub async fn sign_multisig_tx(
		&self,
		tx_id: &str,
		signer: &str,
	) -> MerchantResult<MultiSigSignature> {
		if tx_id.is_empty() || !tx_id.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(MerchantError::InvalidId(tx_id.to_string()));
		}

		let contract_tx_id = self.adapter.sign_multisig_tx(tx_id).await?;
		Ok(MultiSigSignature {
			tx_id: tx_id.to_string(),
			signer: signer.to_string(),
			contract_tx_id: contract_tx_id.to_string(),
			signed_at: Utc::now(),
		})
	}

}

#[cfg(test)]
mod tests {
	use sflow_adapters::MockAdapter;

	use super::*;

	fn service() -> MerchantService {
		MerchantService::new(Arc::new(MockAdapter::new()))
	}

	fn registration() -> RegisterMerchantRequest {
		RegisterMerchantRequest {
			fee_destination: Some("ST1FEES".into()),
			yield_enabled: Some(true),
			yield_percentage: Some(500),
			multi_sig_enabled: Some(false),
			required_signatures: None,
		}
	}

	#[tokio::test]
	async fn registration_round_trip() {
		let service = service();
		let merchant = service.register("M1", &registration()).await.unwrap();
		assert_eq!(merchant.merchant, "M1");
		assert!(merchant.tx_id.is_some());
		assert!(service.is_registered("M1").await.unwrap());
	}

	#[tokio::test]
	async fn duplicate_registration_is_idempotent_failure() {
		let service = service();
		service.register("M1", &registration()).await.unwrap();

		let err = service.register("M1", &registration()).await.unwrap_err();
		assert!(matches!(err, MerchantError::AlreadyRegistered(_)));
	}

	#[tokio::test]
	async fn stats_require_registration() {
		let service = service();
		let err = service.stats("M-ABSENT").await.unwrap_err();
		assert!(matches!(err, MerchantError::NotRegistered(_)));

		service.register("M1", &registration()).await.unwrap();
		let stats = service.stats("M1").await.unwrap();
		assert_eq!(stats.success_rate, 100);
	}

	#[tokio::test]
	async fn subscription_defaults_to_daily_interval() {
		let service = service();
		let subscription = service
			.create_subscription(
				"M1",
				&CreateSubscriptionRequest {
					customer: Some("ST1CUSTOMER".into()),
					amount: Some(5_000),
					interval_blocks: None,
				},
			)
			.await
			.unwrap();
		assert_eq!(subscription.interval_blocks, 144);
		assert!(subscription.active);
		assert!(subscription.tx_id.is_some());
	}

	#[tokio::test]
	async fn subscription_requires_customer_and_amount() {
		let service = service();
		let err = service
			.create_subscription("M1", &CreateSubscriptionRequest::default())
			.await
			.unwrap_err();
		let violations = err.violations().unwrap();
		assert_eq!(violations.len(), 2);
	}

	#[test]
	fn yield_estimate_arithmetic() {
		let service = service();
		// One year at 5% returns 5% of the deposit.
		let estimate = service.estimate_yield(1_000_000, BLOCKS_PER_YEAR).unwrap();
		assert_eq!(estimate.estimated_yield, 50_000);
		assert_eq!(estimate.apy, "5.00%");
	}

	#[tokio::test]
	async fn multisig_proposal_and_signing() {
		let service = service();
		let tx = service
			.create_multisig_tx(
				"M1",
				&CreateMultiSigTxRequest {
					amount: Some(75_000),
					destination: Some("ST1DEST".into()),
				},
			)
			.await
			.unwrap();
		assert_eq!(tx.signatures, vec!["M1".to_string()]);
		assert!(!tx.executed);

		let signature = service.sign_multisig_tx(&tx.tx_id, "M2").await.unwrap();
		assert_eq!(signature.signer, "M2");
	}

	#[tokio::test]
	async fn signing_unknown_proposal_fails() {
		let service = service();
		let err = service
			.sign_multisig_tx(&"ab".repeat(32), "M2")
			.await
			.unwrap_err();
		assert!(matches!(err, MerchantError::Settlement(_)));
	}
}
