//! Orchestration services for the sflow payment gateway.
//!
//! Each service is a stateless façade over the settlement adapter: every
//! mutating call is a synchronous delegate-and-confirm round trip, and no
//! status is cached beyond request scope, so this layer can never diverge
//! from ledger truth.

pub mod lightning;
pub mod merchant;
pub mod payment;
pub mod swap;
pub mod webhook;

pub use lightning::LightningService;
pub use merchant::{MerchantService, MultiSigSignature, SubscriptionCharge, YieldEstimate};
pub use payment::{FeeBreakdown, PaymentService};
pub use swap::{ExecutedSwap, SwapClaimReceipt, SwapService, SwapStatusReport};
pub use webhook::{WebhookError, WebhookVerifier, WebhookVerify};
