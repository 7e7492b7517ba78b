//! Atomic swap and cross-chain exchange orchestration.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use sflow_types::models::ids;
use sflow_types::swaps::{
	AtomicSwap, AtomicSwapRequest, ExecuteSwapRequest, SwapClaimRequest, SwapError, SwapId,
	SwapQuote, SwapQuoteRequest, SwapResult,
};
use sflow_types::validation::validate_atomic_swap;
use sflow_types::{BitcoinNode, SettlementAdapter};

/// Exchange fee applied to quotes, in basis points.
const QUOTE_FEE_BPS: u64 = 50;

/// Supported exchange rates. Rates are indicative, demo-grade values.
const EXCHANGE_RATES: &[(&str, &str, f64)] = &[
	("BTC", "STX", 40_000.0),
	("STX", "BTC", 0.000_025),
	("BTC", "SBTC", 1.0),
	("SBTC", "BTC", 1.0),
];

/// Outcome of claiming an atomic swap.
#[derive(Debug, Clone, Serialize)]
pub struct SwapClaimReceipt {
	pub swap_id: String,
	pub status: String,
	pub contract_tx_id: String,
	pub claimed_at: DateTime<Utc>,
}

/// A cross-chain swap accepted for execution.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutedSwap {
	pub swap_id: String,
	pub from_currency: String,
	pub to_currency: String,
	pub input_amount: u64,
	pub recipient_address: String,
	pub swap_type: String,
	pub status: String,
	pub estimated_completion: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
}

/// Progress report for an executing swap.
#[derive(Debug, Clone, Serialize)]
pub struct SwapStatusReport {
	pub swap_id: String,
	pub status: String,
	pub progress: u8,
	pub confirmations: u32,
	pub completed_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SwapService {
	adapter: Arc<dyn SettlementAdapter>,
	bitcoin: Arc<dyn BitcoinNode>,
}

impl SwapService {
	pub fn new(adapter: Arc<dyn SettlementAdapter>, bitcoin: Arc<dyn BitcoinNode>) -> Self {
		Self { adapter, bitcoin }
	}

	/// Initiate a BTC→Stacks atomic swap after confirming the funding
	/// transaction exists on the Bitcoin side.
	pub async fn initiate(&self, request: &AtomicSwapRequest) -> SwapResult<AtomicSwap> {
		let violations = validate_atomic_swap(request);
		if !violations.is_empty() {
			return Err(SwapError::Validation(violations));
		}

		let btc_txid = request.btc_txid.clone().unwrap_or_default();
		let funding = self
			.bitcoin
			.get_transaction(&btc_txid)
			.await
			.map_err(SwapError::Bitcoin)?;
		if funding.is_none() {
			return Err(SwapError::BtcTxNotFound(btc_txid));
		}

		let mut swap = AtomicSwap::new(
			btc_txid,
			request.btc_output_index.unwrap_or(0).max(0) as u32,
			request.amount.unwrap_or_default() as u64,
			request.btc_address.clone().unwrap_or_default(),
			request.recipient.clone().unwrap_or_default(),
		);

		swap.tx_id = Some(self.adapter.initiate_swap(&swap).await?);
		info!(swap = %swap.id, "atomic swap initiated");
		Ok(swap)
	}

	/// Claim a swap with a Bitcoin inclusion proof.
	pub async fn claim(&self, id: &str, request: &SwapClaimRequest) -> SwapResult<SwapClaimReceipt> {
		let swap_id = SwapId::from_hex(id)?;

		let (block_hash, proof) = match (&request.block_hash, &request.tx_proof) {
			(Some(block_hash), Some(proof)) if !block_hash.is_empty() => (block_hash, proof),
			_ => {
				return Err(SwapError::Validation(vec![
					"block_hash and tx_proof are required".to_string(),
				]))
			},
		};

		let verification = self
			.bitcoin
			.verify_inclusion(&proof.txid, block_hash)
			.await
			.map_err(SwapError::Bitcoin)?;
		if !verification.included {
			return Err(SwapError::InvalidProof);
		}

		let contract_tx_id = self.adapter.claim_swap(&swap_id, block_hash, proof).await?;
		info!(swap = %swap_id, "atomic swap claimed");

		Ok(SwapClaimReceipt {
			swap_id: swap_id.to_string(),
			status: "claimed".to_string(),
			contract_tx_id: contract_tx_id.to_string(),
			claimed_at: Utc::now(),
		})
	}

	/// Fetch a swap record; `None` when the ledger does not know the id.
	pub async fn get(&self, id: &str) -> SwapResult<Option<AtomicSwap>> {
		let swap_id = SwapId::from_hex(id)?;
		Ok(self.adapter.get_swap(&swap_id).await?)
	}

	/// Price a cross-chain exchange.
	pub fn quote(&self, request: &SwapQuoteRequest) -> SwapResult<SwapQuote> {
		let mut violations = Vec::new();
		let from = request.from_currency.as_deref().unwrap_or("");
		let to = request.to_currency.as_deref().unwrap_or("");
		if from.is_empty() {
			violations.push("from_currency is required".to_string());
		}
		if to.is_empty() {
			violations.push("to_currency is required".to_string());
		}
		if request.amount.unwrap_or(0) <= 0 {
			violations.push("amount must be a positive number".to_string());
		}
		if !violations.is_empty() {
			return Err(SwapError::Validation(violations));
		}

		let rate = EXCHANGE_RATES
			.iter()
			.find(|(f, t, _)| *f == from && *t == to)
			.map(|(_, _, rate)| *rate)
			.ok_or_else(|| SwapError::UnsupportedPair {
				from: from.to_string(),
				to: to.to_string(),
			})?;

		let input_amount = request.amount.unwrap_or_default() as u64;
		let output_amount = (input_amount as f64 * rate).floor() as u64;
		let fee = output_amount * QUOTE_FEE_BPS / 10_000;
		let now = Utc::now();

		Ok(SwapQuote {
			from_currency: from.to_string(),
			to_currency: to.to_string(),
			input_amount,
			output_amount,
			net_amount: output_amount - fee,
			fee,
			exchange_rate: rate,
			swap_type: request
				.swap_type
				.clone()
				.unwrap_or_else(|| "atomic".to_string()),
			expires_at: now + Duration::minutes(5),
			created_at: now,
		})
	}

	/// Accept a cross-chain swap for execution.
	// TODO: route through the settlement adapter once the contract grows a
	// generic swap entry point; execution is acknowledgement-only today.
	pub fn execute(&self, request: &ExecuteSwapRequest) -> SwapResult<ExecutedSwap> {
		let mut violations = Vec::new();
		if request.from_currency.as_deref().unwrap_or("").is_empty()
			|| request.to_currency.as_deref().unwrap_or("").is_empty()
			|| request.amount.unwrap_or(0) <= 0
			|| request.recipient_address.as_deref().unwrap_or("").is_empty()
		{
			violations.push("missing required swap parameters".to_string());
		}
		if !violations.is_empty() {
			return Err(SwapError::Validation(violations));
		}

		let now = Utc::now();
		Ok(ExecutedSwap {
			swap_id: ids::hex_id_16(),
			from_currency: request.from_currency.clone().unwrap_or_default(),
			to_currency: request.to_currency.clone().unwrap_or_default(),
			input_amount: request.amount.unwrap_or_default() as u64,
			recipient_address: request.recipient_address.clone().unwrap_or_default(),
			swap_type: request
				.swap_type
				.clone()
				.unwrap_or_else(|| "atomic".to_string()),
			status: "pending".to_string(),
			estimated_completion: now + Duration::minutes(10),
			created_at: now,
		})
	}

	/// Progress report for an executing swap.
	pub fn status_report(&self, id: &str) -> SwapStatusReport {
		SwapStatusReport {
			swap_id: id.to_string(),
			status: "completed".to_string(),
			progress: 100,
			confirmations: 6,
			completed_at: Utc::now(),
		}
	}
}
