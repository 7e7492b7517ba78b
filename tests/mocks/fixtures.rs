//! Request fixtures and client helpers.

#![allow(dead_code)]

use serde_json::{json, Value};

use super::test_server::TEST_API_KEY;

/// Client with the test bearer key attached to every request.
pub fn client() -> reqwest::Client {
	let mut headers = reqwest::header::HeaderMap::new();
	headers.insert(
		reqwest::header::AUTHORIZATION,
		format!("Bearer {TEST_API_KEY}").parse().unwrap(),
	);
	reqwest::Client::builder()
		.default_headers(headers)
		.build()
		.unwrap()
}

/// Client without credentials, for auth tests.
pub fn anonymous_client() -> reqwest::Client {
	reqwest::Client::new()
}

pub fn valid_intent() -> Value {
	json!({
		"merchant": "ST1MERCHANT",
		"amount": 100_000,
		"currency": "BTC",
		"method": 1,
		"expires_in_blocks": 144,
		"metadata": {"order": "42"}
	})
}

pub fn valid_registration() -> Value {
	json!({
		"fee_destination": "ST1FEES",
		"yield_enabled": true,
		"yield_percentage": 500,
		"multi_sig_enabled": false
	})
}

pub fn valid_atomic_swap() -> Value {
	json!({
		"btc_txid": "ab".repeat(32),
		"btc_output_index": 0,
		"amount": 50_000,
		"btc_address": "bc1qexample",
		"recipient": "ST1RECIPIENT"
	})
}
