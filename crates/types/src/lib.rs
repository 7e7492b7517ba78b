//! Domain types for the sflow payment gateway.
//!
//! This crate holds everything the rest of the workspace shares: the payment
//! intent lifecycle state machine, merchant/lightning/swap models, request
//! validation, the settlement adapter traits and the error taxonomy.

pub mod adapters;
pub mod auth;
pub mod constants;
pub mod lightning;
pub mod merchants;
pub mod models;
pub mod payments;
pub mod swaps;
pub mod validation;

pub use adapters::{
	AdapterError, AdapterResult, BitcoinNode, BtcTransaction, InclusionProof, LightningNode,
	SettlementAdapter, TxId,
};
pub use auth::{AuthError, AuthenticationResult, Authenticator, MerchantContext, Permission};
pub use lightning::{
	HtlcLock, HtlcLockRequest, Invoice, InvoiceParams, LightningError, LightningPayment,
	LightningPaymentStatus, PreimagePair,
};
pub use merchants::{
	Merchant, MerchantError, MerchantRegistration, MerchantStats, MultiSigTransaction,
	RegisterMerchantRequest, Subscription, YieldPosition,
};
pub use models::SecretString;
pub use payments::{
	CreatePaymentIntentRequest, PaymentError, PaymentId, PaymentIntent, PaymentMethod,
	PaymentStatus, TransitionReceipt,
};
pub use swaps::{
	AtomicSwap, AtomicSwapRequest, ExecuteSwapRequest, SwapClaimProof, SwapError, SwapId,
	SwapQuote, SwapQuoteRequest, SwapStatus,
};
pub use validation::AmountLimits;

// Re-exported for downstream convenience, so service/api crates don't need
// to pin their own copies for trivial uses.
pub use chrono;
pub use serde_json;
