//! Backend port traits.
//!
//! The settlement adapter is the boundary between domain operations and the
//! external ledger. Two implementations exist — a live Stacks adapter and a
//! deterministic mock — selected at construction time from configuration,
//! never branched on per call.

use std::fmt::Debug;

use async_trait::async_trait;

use super::errors::AdapterResult;
use super::models::{BtcTransaction, InclusionProof, TxId};
use crate::lightning::{HtlcLock, Invoice, InvoiceParams, LightningPayment, PreimagePair};
use crate::merchants::{MerchantRegistration, Subscription};
use crate::payments::{PaymentId, PaymentIntent};
use crate::swaps::{AtomicSwap, SwapClaimProof, SwapId};

/// Boundary translating domain operations into external-ledger transactions.
///
/// Every write returns an opaque transaction reference or fails with
/// [`AdapterError`](super::AdapterError); nothing is retried here. Reads
/// return `None`/`false` for absent entities and fail only on
/// transport/parse problems.
///
/// The ledger serializes all writes and is assumed to enforce at-most-once
/// `process`/`complete` semantics; this layer does not add its own ordering
/// across concurrent requests for the same intent.
#[async_trait]
pub trait SettlementAdapter: Send + Sync + Debug {
	/// Human-readable adapter name for logs.
	fn name(&self) -> &str;

	/// Whether responses are fabricated rather than backed by a live ledger.
	fn is_simulated(&self) -> bool {
		false
	}

	// Payment intent lifecycle

	async fn create_payment_intent(&self, intent: &PaymentIntent) -> AdapterResult<TxId>;

	async fn process_payment(&self, id: &PaymentId) -> AdapterResult<TxId>;

	async fn complete_payment(&self, id: &PaymentId) -> AdapterResult<TxId>;

	async fn cancel_payment(&self, id: &PaymentId) -> AdapterResult<TxId>;

	// Merchants

	async fn register_merchant(
		&self,
		merchant: &str,
		registration: &MerchantRegistration,
	) -> AdapterResult<TxId>;

	async fn create_subscription(&self, subscription: &Subscription) -> AdapterResult<TxId>;

	// HTLC (Lightning settlement leg)

	async fn lock_htlc(&self, lock: &HtlcLock) -> AdapterResult<TxId>;

	async fn claim_htlc(&self, preimage: &str) -> AdapterResult<TxId>;

	async fn refund_htlc(&self, preimage_hash: &str) -> AdapterResult<TxId>;

	// Atomic swaps

	async fn initiate_swap(&self, swap: &AtomicSwap) -> AdapterResult<TxId>;

	async fn claim_swap(
		&self,
		id: &SwapId,
		block_hash: &str,
		proof: &SwapClaimProof,
	) -> AdapterResult<TxId>;

	// Multi-sig

	async fn create_multisig_tx(
		&self,
		tx_id: &str,
		amount: u64,
		destination: &str,
	) -> AdapterResult<TxId>;

	async fn sign_multisig_tx(&self, tx_id: &str) -> AdapterResult<TxId>;

	// Read-only queries

	/// Fetch an intent; `None` when the ledger does not know the id.
	async fn get_payment_intent(&self, id: &PaymentId) -> AdapterResult<Option<PaymentIntent>>;

	/// Raw contract status code for an intent; `None` when unknown. Mapping
	/// to [`PaymentStatus`](crate::PaymentStatus) is the orchestrator's job.
	async fn get_payment_status(&self, id: &PaymentId) -> AdapterResult<Option<u8>>;

	async fn is_merchant_registered(&self, merchant: &str) -> AdapterResult<bool>;

	async fn get_swap(&self, id: &SwapId) -> AdapterResult<Option<AtomicSwap>>;
}

/// Lightning node backend: invoice and payment plumbing.
#[async_trait]
pub trait LightningNode: Send + Sync + Debug {
	async fn create_invoice(&self, params: &InvoiceParams) -> AdapterResult<Invoice>;

	async fn decode_invoice(&self, payment_request: &str) -> AdapterResult<Invoice>;

	async fn pay_invoice(&self, payment_request: &str) -> AdapterResult<LightningPayment>;

	/// `None` when the hash is unknown to the node.
	async fn payment_status(&self, payment_hash: &str) -> AdapterResult<Option<LightningPayment>>;

	/// Estimated routing fee in millisatoshis for the given amount.
	fn estimate_routing_fee(&self, amount_msat: u64) -> u64;

	/// Fresh random preimage and its SHA-256 hash.
	fn generate_preimage(&self) -> PreimagePair;

	/// Cheap shape check on a payment request string.
	fn validate_invoice(&self, payment_request: &str) -> bool;
}

/// Bitcoin node backend: transaction lookups and inclusion proofs.
#[async_trait]
pub trait BitcoinNode: Send + Sync + Debug {
	/// `None` when the txid is unknown.
	async fn get_transaction(&self, txid: &str) -> AdapterResult<Option<BtcTransaction>>;

	async fn verify_inclusion(&self, txid: &str, block_hash: &str)
		-> AdapterResult<InclusionProof>;
}
