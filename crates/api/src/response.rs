//! Uniform response envelope and error mapping.
//!
//! Every endpoint answers `{success, data?, error?: {message, details?}}`;
//! non-2xx status codes always pair with `success: false`. Settlement
//! failures pass their detail through to the client in development and are
//! redacted (and logged server-side) in production profiles.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use sflow_service::WebhookError;
use sflow_types::{LightningError, MerchantError, PaymentError, SwapError};

/// Success envelope.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ApiResponse<T> {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<ErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
	/// `200 {success: true, data}`
	pub fn ok(data: T) -> Json<Self> {
		Json(Self {
			success: true,
			data: Some(data),
			error: None,
		})
	}

	/// `201 {success: true, data}`
	pub fn created(data: T) -> (StatusCode, Json<Self>) {
		(
			StatusCode::CREATED,
			Json(Self {
				success: true,
				data: Some(data),
				error: None,
			}),
		)
	}
}

/// Error payload inside the envelope.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorBody {
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Vec<String>>,
}

/// An error ready to serialize as a `{success: false, error}` envelope.
#[derive(Debug)]
pub struct ApiError {
	pub status: StatusCode,
	pub message: String,
	pub details: Option<Vec<String>>,
}

impl ApiError {
	pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self {
			status,
			message: message.into(),
			details: None,
		}
	}

	pub fn with_details(mut self, details: Vec<String>) -> Self {
		self.details = Some(details);
		self
	}

	pub fn bad_request(message: impl Into<String>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, message)
	}

	pub fn unauthorized(message: impl Into<String>) -> Self {
		Self::new(StatusCode::UNAUTHORIZED, message)
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		Self::new(StatusCode::NOT_FOUND, message)
	}

	pub fn too_many_requests() -> Self {
		Self::new(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded")
	}

	fn validation(details: Vec<String>) -> Self {
		Self::bad_request("Validation failed").with_details(details)
	}

	/// Settlement failures keep their detail in development and are
	/// redacted behind a generic message in production.
	fn settlement(context: &'static str, detail: String, redact: bool) -> Self {
		error!(context, %detail, "settlement adapter failure");
		let message = if redact {
			context.to_string()
		} else {
			format!("{context}: {detail}")
		};
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
	}

	pub fn from_payment(err: PaymentError, redact: bool) -> Self {
		match err {
			PaymentError::Validation(details) => Self::validation(details),
			PaymentError::InvalidId(id) => {
				Self::bad_request(format!("invalid payment id: {id}"))
			},
			PaymentError::InvalidMethod(_) => Self::bad_request(err.to_string()),
			PaymentError::NotFound(_) => Self::not_found("Payment intent not found"),
			PaymentError::StateConflict { .. } => Self::new(StatusCode::CONFLICT, err.to_string()),
			PaymentError::NotSupported(_) => {
				Self::new(StatusCode::NOT_IMPLEMENTED, err.to_string())
			},
			PaymentError::Settlement(cause) => {
				Self::settlement("Failed to settle payment operation", cause.to_string(), redact)
			},
		}
	}

	pub fn from_merchant(err: MerchantError, redact: bool) -> Self {
		match err {
			MerchantError::Validation(details) => Self::validation(details),
			MerchantError::AlreadyRegistered(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
			MerchantError::NotRegistered(_) => Self::not_found("Merchant not registered"),
			MerchantError::InvalidId(id) => Self::bad_request(format!("invalid identifier: {id}")),
			MerchantError::Settlement(cause) => {
				Self::settlement("Failed to settle merchant operation", cause.to_string(), redact)
			},
		}
	}

	pub fn from_lightning(err: LightningError, redact: bool) -> Self {
		match err {
			LightningError::Validation(details) => Self::validation(details),
			LightningError::InvalidInvoice => Self::bad_request("Invalid Lightning invoice"),
			LightningError::InvalidPaymentHash(_) => {
				Self::bad_request("Invalid payment hash format")
			},
			LightningError::PaymentNotFound(_) => Self::not_found("Payment not found"),
			LightningError::Node(cause) => {
				Self::settlement("Lightning node request failed", cause.to_string(), redact)
			},
			LightningError::Settlement(cause) => {
				Self::settlement("Failed to settle Lightning operation", cause.to_string(), redact)
			},
		}
	}

	pub fn from_swap(err: SwapError, redact: bool) -> Self {
		match err {
			SwapError::Validation(details) => Self::validation(details),
			SwapError::InvalidId(id) => Self::bad_request(format!("invalid swap id: {id}")),
			SwapError::BtcTxNotFound(_) => Self::bad_request("Bitcoin transaction not found"),
			SwapError::InvalidProof => Self::bad_request("Invalid Bitcoin transaction proof"),
			SwapError::NotFound(_) => Self::not_found("Atomic swap not found"),
			SwapError::UnsupportedPair { .. } => Self::bad_request("Unsupported currency pair"),
			SwapError::Bitcoin(cause) => {
				Self::settlement("Bitcoin backend request failed", cause.to_string(), redact)
			},
			SwapError::Settlement(cause) => {
				Self::settlement("Failed to settle swap operation", cause.to_string(), redact)
			},
		}
	}

	pub fn from_webhook(err: WebhookError) -> Self {
		match err {
			WebhookError::Hmac(detail) => {
				error!(%detail, "webhook verifier failure");
				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"Webhook signature verification failed",
				)
			},
			other => Self::unauthorized(other.to_string()),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let envelope = ApiResponse::<()> {
			success: false,
			data: None,
			error: Some(ErrorBody {
				message: self.message,
				details: self.details,
			}),
		};
		(self.status, Json(envelope)).into_response()
	}
}
