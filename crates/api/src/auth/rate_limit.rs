//! In-memory fixed-window rate limiting.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use sflow_types::auth::RateLimits;
use sflow_types::constants::limits::RATE_LIMIT_WINDOW_SECONDS;

#[derive(Debug, Clone)]
struct RequestCounter {
	count: u32,
	window_start: DateTime<Utc>,
}

/// Per-key fixed-window request counter.
#[derive(Debug, Default)]
pub struct MemoryRateLimiter {
	counters: Arc<DashMap<String, RequestCounter>>,
}

impl MemoryRateLimiter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a request for `key` and report whether it fits the window.
	pub fn check_and_record(&self, key: &str, limits: &RateLimits) -> bool {
		// Amortized cleanup of dead windows.
		if rand::random::<f64>() < 0.01 {
			self.cleanup_expired();
		}

		let now = Utc::now();
		let window = Duration::seconds(RATE_LIMIT_WINDOW_SECONDS as i64);

		let mut entry = self
			.counters
			.entry(key.to_string())
			.or_insert_with(|| RequestCounter {
				count: 0,
				window_start: now,
			});
		let counter = entry.value_mut();

		if now > counter.window_start + window {
			counter.count = 0;
			counter.window_start = now;
		}

		if counter.count >= limits.requests_per_minute {
			return false;
		}
		counter.count += 1;
		true
	}

	/// Current count for a key, for observability.
	pub fn usage(&self, key: &str) -> u32 {
		self.counters.get(key).map(|c| c.count).unwrap_or(0)
	}

	fn cleanup_expired(&self) {
		let now = Utc::now();
		let window = Duration::seconds(RATE_LIMIT_WINDOW_SECONDS as i64);
		self.counters
			.retain(|_, counter| now <= counter.window_start + window);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn allows_up_to_the_limit() {
		let limiter = MemoryRateLimiter::new();
		let limits = RateLimits {
			requests_per_minute: 3,
		};

		assert!(limiter.check_and_record("k", &limits));
		assert!(limiter.check_and_record("k", &limits));
		assert!(limiter.check_and_record("k", &limits));
		assert!(!limiter.check_and_record("k", &limits));
		assert_eq!(limiter.usage("k"), 3);
	}

	#[test]
	fn keys_are_independent() {
		let limiter = MemoryRateLimiter::new();
		let limits = RateLimits {
			requests_per_minute: 1,
		};

		assert!(limiter.check_and_record("a", &limits));
		assert!(limiter.check_and_record("b", &limits));
		assert!(!limiter.check_and_record("a", &limits));
	}
}
