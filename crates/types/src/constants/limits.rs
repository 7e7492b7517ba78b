//! Protocol limits and defaults.
//!
//! The amount bounds are defaults only: the ledger-side minimum is not
//! final, so the effective bounds come from configuration (`AmountLimits`).

/// Default minimum payment amount in the smallest currency unit.
pub const DEFAULT_MIN_PAYMENT_AMOUNT: u64 = 1_000;

/// Default maximum payment amount in the smallest currency unit.
pub const DEFAULT_MAX_PAYMENT_AMOUNT: u64 = 1_000_000_000;

/// Smallest accepted payment expiry, in blocks.
pub const MIN_EXPIRY_BLOCKS: u32 = 1;

/// Largest accepted payment expiry, in blocks (~1 week).
pub const MAX_EXPIRY_BLOCKS: u32 = 1_008;

/// Default payment expiry when the request omits one (~24 hours).
pub const DEFAULT_EXPIRY_BLOCKS: u32 = 144;

/// Approximate block time used to turn block counts into wall-clock time.
pub const BLOCK_TIME_SECONDS: u64 = 600;

/// Maximum merchant yield share, in basis points (100%).
pub const MAX_YIELD_BASIS_POINTS: u64 = 10_000;

/// Maximum signatures a multi-sig merchant may require.
pub const MAX_REQUIRED_SIGNATURES: u64 = 5;

/// Default subscription billing interval, in blocks (~daily).
pub const DEFAULT_SUBSCRIPTION_INTERVAL_BLOCKS: u32 = 144;

/// Atomic swap expiry, in blocks (~24 hours).
pub const SWAP_EXPIRY_BLOCKS: u32 = 144;

/// Blocks per year, used for yield estimates.
pub const BLOCKS_PER_YEAR: u64 = 52_560;

/// Webhook replay tolerance in seconds.
pub const WEBHOOK_TOLERANCE_SECONDS: i64 = 300;

/// Rate limiting window in seconds.
pub const RATE_LIMIT_WINDOW_SECONDS: u64 = 60;
