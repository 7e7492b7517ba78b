//! Settlement adapter contract and supporting backend ports.

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{AdapterError, AdapterResult};
pub use models::{BtcTransaction, InclusionProof, TxId};
pub use traits::{BitcoinNode, LightningNode, SettlementAdapter};
