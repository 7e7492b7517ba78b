//! Webhook signature verification e2e tests.

mod mocks;

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use crate::mocks::fixtures::anonymous_client;
use crate::mocks::test_server::TEST_WEBHOOK_SECRET;
use crate::mocks::TestServer;

fn sign(secret: &str, timestamp: &str, body: &str) -> String {
	let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
	mac.update(timestamp.as_bytes());
	mac.update(b".");
	mac.update(body.as_bytes());
	hex::encode(mac.finalize().into_bytes())
}

fn payload() -> String {
	json!({
		"payment_id": "ab".repeat(16),
		"status": "confirmed",
		"transaction_hash": "0x0",
		"amount": 100_000
	})
	.to_string()
}

#[tokio::test]
async fn valid_signature_is_accepted() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = anonymous_client();

	let body = payload();
	let timestamp = Utc::now().timestamp().to_string();
	let signature = sign(TEST_WEBHOOK_SECRET, &timestamp, &body);

	let resp = client
		.post(format!("{}/webhooks/payment-update", server.base_url))
		.header("x-timestamp", &timestamp)
		.header("x-signature", &signature)
		.header("content-type", "application/json")
		.body(body)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 200);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], true);
	assert_eq!(body["data"]["status"], "confirmed");

	server.abort();
}

#[tokio::test]
async fn v1_prefixed_signature_is_accepted() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = anonymous_client();

	let body = payload();
	let timestamp = Utc::now().timestamp().to_string();
	let signature = format!("v1={}", sign(TEST_WEBHOOK_SECRET, &timestamp, &body));

	let resp = client
		.post(format!("{}/webhooks/lightning-update", server.base_url))
		.header("x-timestamp", &timestamp)
		.header("x-signature", &signature)
		.header("content-type", "application/json")
		.body(body)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 200);

	server.abort();
}

#[tokio::test]
async fn tampered_body_is_rejected() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = anonymous_client();

	let body = payload();
	let timestamp = Utc::now().timestamp().to_string();
	let signature = sign(TEST_WEBHOOK_SECRET, &timestamp, &body);

	// Flip one byte of the delivered body.
	let tampered = body.replace("confirmed", "confirmeD");
	let resp = client
		.post(format!("{}/webhooks/payment-update", server.base_url))
		.header("x-timestamp", &timestamp)
		.header("x-signature", &signature)
		.header("content-type", "application/json")
		.body(tampered)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 401);

	server.abort();
}

#[tokio::test]
async fn stale_timestamp_is_rejected_with_correct_signature() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = anonymous_client();

	let body = payload();
	let timestamp = (Utc::now().timestamp() - 301).to_string();
	let signature = sign(TEST_WEBHOOK_SECRET, &timestamp, &body);

	let resp = client
		.post(format!("{}/webhooks/payment-update", server.base_url))
		.header("x-timestamp", &timestamp)
		.header("x-signature", &signature)
		.header("content-type", "application/json")
		.body(body)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 401);

	server.abort();
}

#[tokio::test]
async fn missing_headers_are_rejected() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = anonymous_client();

	let resp = client
		.post(format!("{}/webhooks/payment-update", server.base_url))
		.header("content-type", "application/json")
		.body(payload())
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 401);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], false);

	server.abort();
}

#[tokio::test]
async fn wrong_secret_is_rejected() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = anonymous_client();

	let body = payload();
	let timestamp = Utc::now().timestamp().to_string();
	let signature = sign("some-other-secret", &timestamp, &body);

	let resp = client
		.post(format!("{}/webhooks/payment-update", server.base_url))
		.header("x-timestamp", &timestamp)
		.header("x-signature", &signature)
		.header("content-type", "application/json")
		.body(body)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 401);

	server.abort();
}

#[tokio::test]
async fn test_endpoint_echoes_unsigned() {
	let server = TestServer::spawn().await.expect("failed to start server");
	let client = anonymous_client();

	let resp = client
		.post(format!("{}/webhooks/test", server.base_url))
		.json(&json!({"ping": "pong"}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 200);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["data"]["received_data"]["ping"], "pong");

	server.abort();
}
