//! Settlement adapter implementations.
//!
//! Two [`SettlementAdapter`] implementations exist: [`StacksAdapter`] talks
//! to a live Stacks node/API, [`MockAdapter`] keeps a deterministic
//! in-memory ledger. Which one a deployment gets is decided once, at
//! construction time, from configuration. The crate also carries the mock
//! Lightning and Bitcoin backend ports.

pub mod bitcoin;
pub mod lightning;
pub mod mock;
pub mod stacks;

pub use bitcoin::MockBitcoinNode;
pub use lightning::MockLightningNode;
pub use mock::MockAdapter;
pub use sflow_types::{AdapterError, AdapterResult, SettlementAdapter};
pub use stacks::{StacksAdapter, StacksAdapterConfig};
