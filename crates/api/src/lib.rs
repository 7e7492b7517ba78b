//! HTTP surface for the sflow payment gateway.
//!
//! Route handlers compose validation → authentication → orchestration and
//! serialize every outcome into the uniform
//! `{success, data?, error?}` JSON envelope.

pub mod auth;
pub mod handlers;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod pagination;
pub mod response;
pub mod router;
pub mod security;
pub mod state;

pub use auth::{auth_middleware, ApiKeyAuthenticator, AuthConfig, MemoryRateLimiter};
pub use response::{ApiError, ApiResponse, ErrorBody};
pub use router::create_router;
pub use state::AppState;
