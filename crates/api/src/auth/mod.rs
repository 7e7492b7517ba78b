//! Bearer authentication middleware and credential lookup.

pub mod authenticators;
pub mod middleware;
pub mod rate_limit;

pub use authenticators::ApiKeyAuthenticator;
pub use middleware::{auth_middleware, AuthConfig};
pub use rate_limit::MemoryRateLimiter;
