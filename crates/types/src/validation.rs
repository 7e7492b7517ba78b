//! Stateless request validation.
//!
//! One pure function per request shape, each returning a list of
//! human-readable violations; an empty list means the request is valid.
//! Only field presence, ranges and formats are checked here — ledger-state
//! questions such as "merchant already registered" belong downstream.

use crate::constants::limits::{
	DEFAULT_MAX_PAYMENT_AMOUNT, DEFAULT_MIN_PAYMENT_AMOUNT, MAX_EXPIRY_BLOCKS,
	MAX_REQUIRED_SIGNATURES, MAX_YIELD_BASIS_POINTS, MIN_EXPIRY_BLOCKS,
};
use crate::lightning::HtlcLockRequest;
use crate::merchants::{CreateMultiSigTxRequest, RegisterMerchantRequest};
use crate::payments::CreatePaymentIntentRequest;
use crate::swaps::AtomicSwapRequest;

/// Effective payment amount bounds, in the smallest currency unit.
///
/// The ledger-side minimum is not finalized, so the bounds are configured
/// rather than hardcoded; the defaults mirror the contract constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountLimits {
	pub min: u64,
	pub max: u64,
}

impl Default for AmountLimits {
	fn default() -> Self {
		Self {
			min: DEFAULT_MIN_PAYMENT_AMOUNT,
			max: DEFAULT_MAX_PAYMENT_AMOUNT,
		}
	}
}

fn is_hex_of_len(s: &str, chars: usize) -> bool {
	s.len() == chars && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Validate a payment intent creation request against §3 constraints.
pub fn validate_payment_intent(
	request: &CreatePaymentIntentRequest,
	limits: &AmountLimits,
) -> Vec<String> {
	let mut errors = Vec::new();

	if request.merchant.as_deref().unwrap_or("").is_empty() {
		errors.push("merchant is required".to_string());
	}

	match request.amount {
		None => errors.push("amount must be a positive number".to_string()),
		Some(amount) if amount <= 0 => {
			errors.push("amount must be a positive number".to_string());
		},
		Some(amount) => {
			if (amount as u64) < limits.min {
				errors.push(format!("amount must be at least {} units", limits.min));
			}
			if amount as u64 > limits.max {
				errors.push("amount exceeds maximum limit".to_string());
			}
		},
	}

	if request.currency.as_deref().unwrap_or("").is_empty() {
		errors.push("currency is required".to_string());
	}

	match request.method {
		Some(m) if (1..=4).contains(&m) => {},
		_ => errors.push(
			"method must be 1 (sBTC), 2 (Lightning), 3 (BTC L1), or 4 (Liquid)".to_string(),
		),
	}

	if let Some(blocks) = request.expires_in_blocks {
		if blocks < MIN_EXPIRY_BLOCKS as i64 || blocks > MAX_EXPIRY_BLOCKS as i64 {
			errors.push(format!(
				"expires_in_blocks must be between {} and {}",
				MIN_EXPIRY_BLOCKS, MAX_EXPIRY_BLOCKS
			));
		}
	}

	errors
}

/// Validate a merchant registration request.
pub fn validate_merchant_registration(request: &RegisterMerchantRequest) -> Vec<String> {
	let mut errors = Vec::new();

	if request.fee_destination.as_deref().unwrap_or("").is_empty() {
		errors.push("fee_destination is required".to_string());
	}

	let yield_enabled = match request.yield_enabled {
		Some(flag) => flag,
		None => {
			errors.push("yield_enabled must be a boolean".to_string());
			false
		},
	};

	if yield_enabled {
		match request.yield_percentage {
			Some(bps) if (0..=MAX_YIELD_BASIS_POINTS as i64).contains(&bps) => {},
			_ => errors.push(format!(
				"yield_percentage must be between 0 and {} (100%)",
				MAX_YIELD_BASIS_POINTS
			)),
		}
	}

	let multi_sig_enabled = match request.multi_sig_enabled {
		Some(flag) => flag,
		None => {
			errors.push("multi_sig_enabled must be a boolean".to_string());
			false
		},
	};

	if multi_sig_enabled {
		match request.required_signatures {
			Some(n) if (1..=MAX_REQUIRED_SIGNATURES as i64).contains(&n) => {},
			_ => errors.push(format!(
				"required_signatures must be between 1 and {}",
				MAX_REQUIRED_SIGNATURES
			)),
		}
	}

	errors
}

/// Validate an HTLC lock request for the Lightning settlement leg.
pub fn validate_htlc_lock(request: &HtlcLockRequest) -> Vec<String> {
	let mut errors = Vec::new();

	match request.payment_id.as_deref() {
		None | Some("") => errors.push("payment_id is required".to_string()),
		Some(id) if !is_hex_of_len(id, 32) => {
			errors.push("payment_id must be 16 hex-encoded bytes".to_string());
		},
		Some(_) => {},
	}

	if request.amount.unwrap_or(0) <= 0 {
		errors.push("amount must be a positive number".to_string());
	}

	match request.preimage_hash.as_deref() {
		None | Some("") => errors.push("preimage_hash is required".to_string()),
		Some(hash) if !is_hex_of_len(hash, 64) => {
			errors.push("preimage_hash must be a 32-byte hex string".to_string());
		},
		Some(_) => {},
	}

	if request.recipient.as_deref().unwrap_or("").is_empty() {
		errors.push("recipient is required".to_string());
	}

	errors
}

/// Validate an atomic swap initiation request.
pub fn validate_atomic_swap(request: &AtomicSwapRequest) -> Vec<String> {
	let mut errors = Vec::new();

	match request.btc_txid.as_deref() {
		None | Some("") => errors.push("btc_txid is required".to_string()),
		Some(txid) if !is_hex_of_len(txid, 64) => {
			errors.push("btc_txid must be a 32-byte hex string".to_string());
		},
		Some(_) => {},
	}

	if request.amount.unwrap_or(0) <= 0 {
		errors.push("amount must be a positive number".to_string());
	}

	if let Some(index) = request.btc_output_index {
		if index < 0 {
			errors.push("btc_output_index must not be negative".to_string());
		}
	}

	if request.btc_address.as_deref().unwrap_or("").is_empty() {
		errors.push("btc_address is required".to_string());
	}

	if request.recipient.as_deref().unwrap_or("").is_empty() {
		errors.push("recipient is required".to_string());
	}

	errors
}

/// Validate a multi-sig transaction proposal.
pub fn validate_multisig_tx(request: &CreateMultiSigTxRequest) -> Vec<String> {
	let mut errors = Vec::new();

	if request.amount.unwrap_or(0) <= 0 {
		errors.push("amount must be a positive number".to_string());
	}

	if request.destination.as_deref().unwrap_or("").is_empty() {
		errors.push("destination is required".to_string());
	}

	errors
}

#[cfg(test)]
mod tests {
	use super::*;

	fn valid_intent() -> CreatePaymentIntentRequest {
		CreatePaymentIntentRequest {
			merchant: Some("ST1MERCHANT".into()),
			amount: Some(100_000),
			currency: Some("BTC".into()),
			method: Some(1),
			expires_in_blocks: Some(144),
			metadata: None,
		}
	}

	#[test]
	fn accepts_valid_intent() {
		assert!(validate_payment_intent(&valid_intent(), &AmountLimits::default()).is_empty());
	}

	#[test]
	fn amount_boundaries() {
		let limits = AmountLimits::default();

		let mut request = valid_intent();
		request.amount = Some(999);
		let errors = validate_payment_intent(&request, &limits);
		assert!(errors.iter().any(|e| e.contains("at least 1000")));

		request.amount = Some(1_000);
		assert!(validate_payment_intent(&request, &limits).is_empty());

		request.amount = Some(1_000_000_000);
		assert!(validate_payment_intent(&request, &limits).is_empty());

		request.amount = Some(1_000_000_001);
		let errors = validate_payment_intent(&request, &limits);
		assert!(errors.iter().any(|e| e.contains("maximum limit")));
	}

	#[test]
	fn configured_bounds_override_defaults() {
		let limits = AmountLimits { min: 500, max: 2_000 };

		let mut request = valid_intent();
		request.amount = Some(500);
		assert!(validate_payment_intent(&request, &limits).is_empty());

		request.amount = Some(499);
		assert!(!validate_payment_intent(&request, &limits).is_empty());
	}

	#[test]
	fn method_bounds() {
		let limits = AmountLimits::default();
		for method in [0, 5, -1] {
			let mut request = valid_intent();
			request.method = Some(method);
			let errors = validate_payment_intent(&request, &limits);
			assert!(errors.iter().any(|e| e.contains("method")), "method {method}");
		}
		for method in 1..=4 {
			let mut request = valid_intent();
			request.method = Some(method);
			assert!(validate_payment_intent(&request, &limits).is_empty());
		}
	}

	#[test]
	fn expiry_bounds() {
		let limits = AmountLimits::default();
		for blocks in [0, 1_009] {
			let mut request = valid_intent();
			request.expires_in_blocks = Some(blocks);
			let errors = validate_payment_intent(&request, &limits);
			assert!(errors.iter().any(|e| e.contains("expires_in_blocks")));
		}
		for blocks in [1, 1_008] {
			let mut request = valid_intent();
			request.expires_in_blocks = Some(blocks);
			assert!(validate_payment_intent(&request, &limits).is_empty());
		}
		// Omitted expiry falls back to the default downstream.
		let mut request = valid_intent();
		request.expires_in_blocks = None;
		assert!(validate_payment_intent(&request, &limits).is_empty());
	}

	#[test]
	fn missing_fields_each_produce_a_violation() {
		let errors =
			validate_payment_intent(&CreatePaymentIntentRequest::default(), &AmountLimits::default());
		assert!(errors.iter().any(|e| e.contains("merchant")));
		assert!(errors.iter().any(|e| e.contains("amount")));
		assert!(errors.iter().any(|e| e.contains("currency")));
		assert!(errors.iter().any(|e| e.contains("method")));
	}

	#[test]
	fn merchant_registration_rules() {
		let valid = RegisterMerchantRequest {
			fee_destination: Some("ST1FEES".into()),
			yield_enabled: Some(true),
			yield_percentage: Some(500),
			multi_sig_enabled: Some(false),
			required_signatures: None,
		};
		assert!(validate_merchant_registration(&valid).is_empty());

		let mut bad_yield = valid.clone();
		bad_yield.yield_percentage = Some(10_001);
		assert!(!validate_merchant_registration(&bad_yield).is_empty());

		let mut multisig = valid.clone();
		multisig.multi_sig_enabled = Some(true);
		multisig.required_signatures = Some(6);
		assert!(!validate_merchant_registration(&multisig).is_empty());
		multisig.required_signatures = Some(5);
		assert!(validate_merchant_registration(&multisig).is_empty());

		let empty = RegisterMerchantRequest::default();
		let errors = validate_merchant_registration(&empty);
		assert!(errors.iter().any(|e| e.contains("fee_destination")));
		assert!(errors.iter().any(|e| e.contains("yield_enabled")));
		assert!(errors.iter().any(|e| e.contains("multi_sig_enabled")));
	}

	#[test]
	fn htlc_lock_rules() {
		let valid = HtlcLockRequest {
			payment_id: Some("ab".repeat(16)),
			amount: Some(10_000),
			preimage_hash: Some("cd".repeat(32)),
			timelock: None,
			recipient: Some("ST1RECIPIENT".into()),
		};
		assert!(validate_htlc_lock(&valid).is_empty());

		let mut bad_hash = valid.clone();
		bad_hash.preimage_hash = Some("not-hex".into());
		assert!(!validate_htlc_lock(&bad_hash).is_empty());

		assert_eq!(validate_htlc_lock(&HtlcLockRequest::default()).len(), 4);
	}

	#[test]
	fn atomic_swap_rules() {
		let valid = AtomicSwapRequest {
			btc_txid: Some("ef".repeat(32)),
			btc_output_index: Some(0),
			amount: Some(50_000),
			btc_address: Some("bc1qexample".into()),
			recipient: Some("ST1RECIPIENT".into()),
		};
		assert!(validate_atomic_swap(&valid).is_empty());

		let mut short_txid = valid.clone();
		short_txid.btc_txid = Some("abcd".into());
		assert!(!validate_atomic_swap(&short_txid).is_empty());
	}
}
