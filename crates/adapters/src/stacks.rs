//! Live Stacks settlement adapter.
//!
//! Translates domain operations into `sflow` contract calls against the
//! configured node/API provider. Write operations go through the node's
//! contract-call endpoint (transaction assembly and signing happen on the
//! node side, keyed by the configured sender credential); reads go through
//! the read-only call endpoint. Nothing is retried here — callers own retry
//! policy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use sflow_types::adapters::{AdapterError, AdapterResult, TxId};
use sflow_types::lightning::HtlcLock;
use sflow_types::merchants::{MerchantRegistration, Subscription};
use sflow_types::payments::{PaymentId, PaymentIntent};
use sflow_types::swaps::{AtomicSwap, SwapClaimProof, SwapId};
use sflow_types::{SecretString, SettlementAdapter};

/// Construction parameters for [`StacksAdapter`], mapped from settings by
/// the gateway builder.
#[derive(Debug, Clone)]
pub struct StacksAdapterConfig {
	/// Node/API base URL, e.g. `https://api.testnet.hiro.so`.
	pub api_url: String,
	pub contract_address: String,
	pub contract_name: String,
	/// Network label sent with contract calls (mainnet/testnet/devnet).
	pub network: String,
	/// Per-call HTTP timeout.
	pub timeout_ms: u64,
}

/// A Clarity argument in the node API's JSON encoding.
#[derive(Debug, Clone, Serialize)]
struct ClarityArg {
	#[serde(rename = "type")]
	kind: &'static str,
	value: String,
}

fn uint(value: u64) -> ClarityArg {
	ClarityArg {
		kind: "uint",
		value: value.to_string(),
	}
}

fn principal(value: &str) -> ClarityArg {
	ClarityArg {
		kind: "principal",
		value: value.to_string(),
	}
}

fn buff(hex_value: impl Into<String>) -> ClarityArg {
	ClarityArg {
		kind: "buff",
		value: hex_value.into(),
	}
}

fn bool_arg(value: bool) -> ClarityArg {
	ClarityArg {
		kind: "bool",
		value: value.to_string(),
	}
}

/// Buffer argument from free-form text: hex passes through, anything else
/// is hex-encoded from its UTF-8 bytes.
fn buff_from_text(value: &str) -> ClarityArg {
	if !value.is_empty() && value.len() % 2 == 0 && value.bytes().all(|b| b.is_ascii_hexdigit()) {
		buff(value.to_lowercase())
	} else {
		buff(hex::encode(value.as_bytes()))
	}
}

#[derive(Debug, Serialize)]
struct ContractCallRequest<'a> {
	contract_address: &'a str,
	contract_name: &'a str,
	function_name: &'a str,
	function_args: Vec<ClarityArg>,
	network: &'a str,
	sender_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct ContractCallResponse {
	txid: String,
}

#[derive(Debug, Serialize)]
struct ReadOnlyCallRequest<'a> {
	sender: &'a str,
	arguments: Vec<ClarityArg>,
}

#[derive(Debug, Deserialize)]
struct ReadOnlyCallResponse {
	okay: bool,
	#[serde(default)]
	result: Option<Value>,
	#[serde(default)]
	cause: Option<String>,
}

/// Settlement adapter backed by a live Stacks node/API.
pub struct StacksAdapter {
	client: Client,
	base: Url,
	contract_address: String,
	contract_name: String,
	network: String,
	sender_key: SecretString,
}

impl std::fmt::Debug for StacksAdapter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StacksAdapter")
			.field("base", &self.base.as_str())
			.field(
				"contract",
				&format!("{}.{}", self.contract_address, self.contract_name),
			)
			.field("network", &self.network)
			.finish_non_exhaustive()
	}
}

impl StacksAdapter {
	pub fn new(config: StacksAdapterConfig, sender_key: SecretString) -> AdapterResult<Self> {
		let base = Url::parse(&config.api_url)
			.map_err(|e| AdapterError::Configuration(format!("invalid api_url: {e}")))?;

		let client = Client::builder()
			.timeout(Duration::from_millis(config.timeout_ms))
			.build()
			.map_err(|e| AdapterError::Configuration(e.to_string()))?;

		Ok(Self {
			client,
			base,
			contract_address: config.contract_address,
			contract_name: config.contract_name,
			network: config.network,
			sender_key,
		})
	}

	fn endpoint(&self, path: &str) -> AdapterResult<Url> {
		self.base
			.join(path)
			.map_err(|e| AdapterError::Configuration(format!("invalid endpoint path: {e}")))
	}

	/// Submit a state-changing contract call and return its transaction id.
	async fn call_contract(
		&self,
		function_name: &str,
		function_args: Vec<ClarityArg>,
	) -> AdapterResult<TxId> {
		let url = self.endpoint("v2/contracts/call")?;
		let request = ContractCallRequest {
			contract_address: &self.contract_address,
			contract_name: &self.contract_name,
			function_name,
			function_args,
			network: &self.network,
			sender_key: self.sender_key.expose_secret(),
		};

		debug!(function = function_name, "submitting contract call");

		let response = self
			.client
			.post(url)
			.json(&request)
			.send()
			.await
			.map_err(|e| AdapterError::Transport(e.to_string()))?;

		if !response.status().is_success() {
			let status = response.status();
			let body = response.text().await.unwrap_or_default();
			warn!(function = function_name, %status, "contract call rejected");
			return Err(AdapterError::Rejected(format!("{status}: {body}")));
		}

		let parsed: ContractCallResponse = response
			.json()
			.await
			.map_err(|e| AdapterError::MalformedResponse(e.to_string()))?;

		Ok(TxId(parsed.txid))
	}

	/// Execute a read-only contract call; `Ok(None)` means the contract
	/// reported no entry for the queried key.
	async fn call_read_only(
		&self,
		function_name: &str,
		arguments: Vec<ClarityArg>,
	) -> AdapterResult<Option<Value>> {
		let url = self.endpoint(&format!(
			"v2/contracts/call-read/{}/{}/{}",
			self.contract_address, self.contract_name, function_name
		))?;
		let request = ReadOnlyCallRequest {
			sender: &self.contract_address,
			arguments,
		};

		let response = self
			.client
			.post(url)
			.json(&request)
			.send()
			.await
			.map_err(|e| AdapterError::Transport(e.to_string()))?;

		if !response.status().is_success() {
			return Err(AdapterError::Transport(format!(
				"read-only call returned {}",
				response.status()
			)));
		}

		let parsed: ReadOnlyCallResponse = response
			.json()
			.await
			.map_err(|e| AdapterError::MalformedResponse(e.to_string()))?;

		if !parsed.okay {
			return Err(AdapterError::MalformedResponse(
				parsed.cause.unwrap_or_else(|| "call not okay".to_string()),
			));
		}

		match parsed.result {
			None | Some(Value::Null) => Ok(None),
			Some(value) => Ok(Some(value)),
		}
	}
}

fn field_str(value: &Value, field: &str) -> AdapterResult<String> {
	value
		.get(field)
		.and_then(Value::as_str)
		.map(str::to_string)
		.ok_or_else(|| AdapterError::MalformedResponse(format!("missing field {field}")))
}

fn field_u64(value: &Value, field: &str) -> AdapterResult<u64> {
	let raw = value
		.get(field)
		.ok_or_else(|| AdapterError::MalformedResponse(format!("missing field {field}")))?;
	// The node encodes uints either as numbers or decimal strings.
	raw.as_u64()
		.or_else(|| raw.as_str().and_then(|s| s.parse().ok()))
		.ok_or_else(|| AdapterError::MalformedResponse(format!("field {field} is not a uint")))
}

fn parse_intent(value: &Value) -> AdapterResult<PaymentIntent> {
	let json = serde_json::json!({
		"id": field_str(value, "id")?,
		"merchant": field_str(value, "merchant")?,
		"amount": field_u64(value, "amount")?,
		"currency": field_str(value, "currency")?,
		"method": field_u64(value, "method")?,
		"status": field_str(value, "status")?,
		"created_at": field_str(value, "created_at")?,
		"expires_at": field_str(value, "expires_at")?,
	});
	serde_json::from_value(json).map_err(|e| AdapterError::MalformedResponse(e.to_string()))
}

fn parse_swap(value: &Value) -> AdapterResult<AtomicSwap> {
	let json = serde_json::json!({
		"id": field_str(value, "id")?,
		"btc_txid": field_str(value, "btc_txid")?,
		"btc_output_index": field_u64(value, "btc_output_index")?,
		"amount": field_u64(value, "amount")?,
		"btc_address": field_str(value, "btc_address")?,
		"recipient": field_str(value, "recipient")?,
		"status": field_str(value, "status")?,
		"expires_at": field_str(value, "expires_at")?,
		"created_at": field_str(value, "created_at")?,
	});
	serde_json::from_value(json).map_err(|e| AdapterError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl SettlementAdapter for StacksAdapter {
	fn name(&self) -> &str {
		"stacks"
	}

	async fn create_payment_intent(&self, intent: &PaymentIntent) -> AdapterResult<TxId> {
		self.call_contract(
			"create-payment-intent",
			vec![
				buff(hex::encode(intent.id.as_bytes())),
				principal(&intent.merchant),
				uint(intent.amount),
				principal(&intent.currency),
				uint(intent.method.as_u8() as u64),
				uint(((intent.expires_at - intent.created_at).num_seconds() / 600) as u64),
			],
		)
		.await
	}

	async fn process_payment(&self, id: &PaymentId) -> AdapterResult<TxId> {
		self.call_contract("process-payment", vec![buff(hex::encode(id.as_bytes()))])
			.await
	}

	async fn complete_payment(&self, id: &PaymentId) -> AdapterResult<TxId> {
		self.call_contract("complete-payment", vec![buff(hex::encode(id.as_bytes()))])
			.await
	}

	async fn cancel_payment(&self, id: &PaymentId) -> AdapterResult<TxId> {
		self.call_contract("cancel-payment", vec![buff(hex::encode(id.as_bytes()))])
			.await
	}

	async fn register_merchant(
		&self,
		_merchant: &str,
		registration: &MerchantRegistration,
	) -> AdapterResult<TxId> {
		self.call_contract(
			"register-merchant",
			vec![
				principal(&registration.fee_destination),
				bool_arg(registration.yield_enabled),
				uint(registration.yield_percentage),
				bool_arg(registration.multi_sig_enabled),
				uint(registration.required_signatures),
			],
		)
		.await
	}

	async fn create_subscription(&self, subscription: &Subscription) -> AdapterResult<TxId> {
		self.call_contract(
			"create-subscription",
			vec![
				buff(subscription.subscription_id.clone()),
				principal(&subscription.merchant),
				uint(subscription.amount),
				uint(subscription.interval_blocks as u64),
			],
		)
		.await
	}

	async fn lock_htlc(&self, lock: &HtlcLock) -> AdapterResult<TxId> {
		self.call_contract(
			"lock-lightning-payment",
			vec![
				buff(lock.preimage_hash.clone()),
				buff(hex::encode(lock.payment_id.as_bytes())),
				uint(lock.amount),
				uint(lock.timelock.max(0) as u64),
				principal(&lock.recipient),
			],
		)
		.await
	}

	async fn claim_htlc(&self, preimage: &str) -> AdapterResult<TxId> {
		self.call_contract("claim-lightning-payment", vec![buff_from_text(preimage)])
			.await
	}

	async fn refund_htlc(&self, preimage_hash: &str) -> AdapterResult<TxId> {
		self.call_contract(
			"refund-lightning-payment",
			vec![buff_from_text(preimage_hash)],
		)
		.await
	}

	async fn initiate_swap(&self, swap: &AtomicSwap) -> AdapterResult<TxId> {
		self.call_contract(
			"initiate-btc-swap",
			vec![
				buff(hex::encode(swap.id.as_bytes())),
				buff(swap.btc_txid.clone()),
				uint(swap.btc_output_index as u64),
				uint(swap.amount),
				buff_from_text(&swap.btc_address),
				principal(&swap.recipient),
			],
		)
		.await
	}

	async fn claim_swap(
		&self,
		id: &SwapId,
		block_hash: &str,
		proof: &SwapClaimProof,
	) -> AdapterResult<TxId> {
		self.call_contract(
			"claim-btc-swap",
			vec![
				buff(hex::encode(id.as_bytes())),
				buff_from_text(block_hash),
				buff_from_text(&proof.tx_hex),
			],
		)
		.await
	}

	async fn create_multisig_tx(
		&self,
		tx_id: &str,
		amount: u64,
		destination: &str,
	) -> AdapterResult<TxId> {
		self.call_contract(
			"create-multisig-tx",
			vec![buff_from_text(tx_id), uint(amount), principal(destination)],
		)
		.await
	}

	async fn sign_multisig_tx(&self, tx_id: &str) -> AdapterResult<TxId> {
		self.call_contract("sign-multisig-tx", vec![buff_from_text(tx_id)])
			.await
	}

	async fn get_payment_intent(&self, id: &PaymentId) -> AdapterResult<Option<PaymentIntent>> {
		let result = self
			.call_read_only("get-payment-intent", vec![buff(hex::encode(id.as_bytes()))])
			.await?;
		result.as_ref().map(parse_intent).transpose()
	}

	async fn get_payment_status(&self, id: &PaymentId) -> AdapterResult<Option<u8>> {
		let result = self
			.call_read_only("get-payment-status", vec![buff(hex::encode(id.as_bytes()))])
			.await?;
		match result {
			None => Ok(None),
			Some(value) => {
				let code = value
					.as_u64()
					.or_else(|| value.as_str().and_then(|s| s.parse().ok()))
					.ok_or_else(|| {
						AdapterError::MalformedResponse("status code is not a uint".to_string())
					})?;
				Ok(Some(code.min(u8::MAX as u64) as u8))
			},
		}
	}

	async fn is_merchant_registered(&self, merchant: &str) -> AdapterResult<bool> {
		let result = self
			.call_read_only("is-merchant-registered", vec![principal(merchant)])
			.await?;
		Ok(result.and_then(|v| v.as_bool()).unwrap_or(false))
	}

	async fn get_swap(&self, id: &SwapId) -> AdapterResult<Option<AtomicSwap>> {
		let result = self
			.call_read_only("get-atomic-swap", vec![buff(hex::encode(id.as_bytes()))])
			.await?;
		result.as_ref().map(parse_swap).transpose()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn adapter() -> StacksAdapter {
		StacksAdapter::new(
			StacksAdapterConfig {
				api_url: "http://localhost:3999".to_string(),
				contract_address: "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".to_string(),
				contract_name: "sflow".to_string(),
				network: "devnet".to_string(),
				timeout_ms: 5_000,
			},
			SecretString::from("test-key"),
		)
		.unwrap()
	}

	#[test]
	fn rejects_invalid_api_url() {
		let result = StacksAdapter::new(
			StacksAdapterConfig {
				api_url: "not a url".to_string(),
				contract_address: "ST1".to_string(),
				contract_name: "sflow".to_string(),
				network: "devnet".to_string(),
				timeout_ms: 5_000,
			},
			SecretString::from("k"),
		);
		assert!(matches!(result, Err(AdapterError::Configuration(_))));
	}

	#[test]
	fn endpoints_join_cleanly() {
		let adapter = adapter();
		let url = adapter.endpoint("v2/contracts/call").unwrap();
		assert_eq!(url.as_str(), "http://localhost:3999/v2/contracts/call");
	}

	#[test]
	fn buff_from_text_passes_hex_through() {
		assert_eq!(buff_from_text("DEADBEEF").value, "deadbeef");
		assert_eq!(buff_from_text("bc1q").value, hex::encode("bc1q"));
	}

	#[test]
	fn debug_output_hides_sender_key() {
		let output = format!("{:?}", adapter());
		assert!(!output.contains("test-key"));
	}

	#[test]
	fn parse_intent_round_trips() {
		let id = PaymentId::generate();
		let value = serde_json::json!({
			"id": id.to_string(),
			"merchant": "ST1MERCHANT",
			"amount": 100000,
			"currency": "BTC",
			"method": 1,
			"status": "pending",
			"created_at": "2026-01-01T00:00:00Z",
			"expires_at": "2026-01-02T00:00:00Z",
		});
		let intent = parse_intent(&value).unwrap();
		assert_eq!(intent.id, id);
		assert_eq!(intent.amount, 100_000);
	}

	#[test]
	fn parse_intent_rejects_missing_fields() {
		let value = serde_json::json!({"id": "00"});
		assert!(matches!(
			parse_intent(&value),
			Err(AdapterError::MalformedResponse(_))
		));
	}
}
