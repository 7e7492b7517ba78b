//! Swaps API e2e tests.

mod mocks;

use serde_json::{json, Value};

use crate::mocks::fixtures::{client, valid_atomic_swap};
use crate::mocks::TestServer;

#[tokio::test]
async fn atomic_swap_lifecycle() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = client();

	let resp = client
		.post(format!("{}/swaps/atomic", server.base_url))
		.json(&valid_atomic_swap())
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 201);
	let body: Value = resp.json().await.unwrap();
	let data = &body["data"];
	assert_eq!(data["status"], "active");
	let id = data["swap_id"].as_str().unwrap().to_string();
	assert_eq!(id.len(), 64);

	let resp = client
		.get(format!("{}/swaps/atomic/{id}", server.base_url))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 200);

	let resp = client
		.post(format!("{}/swaps/atomic/{id}/claim", server.base_url))
		.json(&json!({
			"block_hash": "cd".repeat(32),
			"tx_proof": {
				"txid": "ab".repeat(32),
				"tx_hex": "0200",
				"merkle_proof": ["ee".repeat(32)]
			}
		}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 200);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["data"]["status"], "claimed");

	let resp = client
		.get(format!("{}/swaps/atomic/{id}", server.base_url))
		.send()
		.await
		.unwrap();
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["data"]["status"], "claimed");

	server.abort();
}

#[tokio::test]
async fn claim_rejects_invalid_proof() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = client();

	let resp = client
		.post(format!("{}/swaps/atomic", server.base_url))
		.json(&valid_atomic_swap())
		.send()
		.await
		.unwrap();
	let body: Value = resp.json().await.unwrap();
	let id = body["data"]["swap_id"].as_str().unwrap().to_string();

	// Missing proof body.
	let resp = client
		.post(format!("{}/swaps/atomic/{id}/claim", server.base_url))
		.json(&json!({}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 400);

	// Malformed block hash fails inclusion verification.
	let resp = client
		.post(format!("{}/swaps/atomic/{id}/claim", server.base_url))
		.json(&json!({
			"block_hash": "junk",
			"tx_proof": {"txid": "ab".repeat(32), "tx_hex": "0200", "merkle_proof": []}
		}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 400);

	server.abort();
}

#[tokio::test]
async fn unknown_swap_is_404() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = client();

	let absent = "00".repeat(32);
	let resp = client
		.get(format!("{}/swaps/atomic/{absent}", server.base_url))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 404);

	server.abort();
}

#[tokio::test]
async fn quote_math_and_unsupported_pairs() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = client();

	let resp = client
		.post(format!("{}/swaps/quote", server.base_url))
		.json(&json!({"from_currency": "BTC", "to_currency": "STX", "amount": 100}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 200);
	let body: Value = resp.json().await.unwrap();
	let data = &body["data"];
	assert_eq!(data["output_amount"], 4_000_000);
	assert_eq!(data["fee"], 20_000);
	assert_eq!(data["net_amount"], 3_980_000);

	// 1:1 peg.
	let resp = client
		.post(format!("{}/swaps/quote", server.base_url))
		.json(&json!({"from_currency": "BTC", "to_currency": "SBTC", "amount": 10_000}))
		.send()
		.await
		.unwrap();
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["data"]["output_amount"], 10_000);

	let resp = client
		.post(format!("{}/swaps/quote", server.base_url))
		.json(&json!({"from_currency": "BTC", "to_currency": "DOGE", "amount": 100}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 400);

	server.abort();
}

#[tokio::test]
async fn execute_status_and_list() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = client();

	let resp = client
		.post(format!("{}/swaps/execute", server.base_url))
		.json(&json!({
			"from_currency": "BTC",
			"to_currency": "STX",
			"amount": 1_000,
			"recipient_address": "ST1RECIPIENT"
		}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 201);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["data"]["status"], "pending");
	let id = body["data"]["swap_id"].as_str().unwrap().to_string();

	let resp = client
		.get(format!("{}/swaps/{id}/status", server.base_url))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 200);

	let resp = client
		.get(format!("{}/swaps", server.base_url))
		.send()
		.await
		.unwrap();
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["data"]["swaps"].as_array().unwrap().len(), 0);

	// Execute with missing parameters is rejected.
	let resp = client
		.post(format!("{}/swaps/execute", server.base_url))
		.json(&json!({"from_currency": "BTC"}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 400);

	server.abort();
}
