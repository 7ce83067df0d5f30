//! Reactive client-side throttle driven by server rate-limit headers.
//!
//! The server advertises how many requests remain in the current window and how long the
//! window lasts. [`RateLimiter::record_response`] stores both after every completed
//! exchange; [`RateLimiter::throttle`] runs before the next request and sleeps for the
//! refresh interval once the remaining budget drops to the configured threshold.
//!
//! The decision only ever uses state recorded from earlier responses, so bursts can still
//! exceed the true server limit. All counters live under a single mutex, which is never
//! held while sleeping. Sleepers queue on a separate gate instead.

// std
use std::thread;
// crates.io
use http::{HeaderMap, HeaderName};
// self
use crate::{_prelude::*, error::ConfigError, obs};

/// Default name of the remaining-budget header.
pub const DEFAULT_REMAINING_HEADER: &str = "requestsRemainingHeader";
/// Default name of the refresh-interval header.
pub const DEFAULT_REFRESH_INTERVAL_HEADER: &str = "requestRefreshInterval";

/// Rate-limit settings, including the initial state assumed before any response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
	/// Remaining budget assumed before the first response arrives.
	pub initial_remaining: i64,
	/// Refresh interval assumed before the first response arrives.
	pub initial_refresh_interval_secs: i64,
	/// Requests are delayed once the remaining budget is at or below this value.
	pub throttle_threshold: i64,
	/// Header advertising the remaining budget.
	pub remaining_header: String,
	/// Header advertising the refresh interval in seconds.
	pub refresh_interval_header: String,
}
impl Default for RateLimitConfig {
	fn default() -> Self {
		Self {
			initial_remaining: 30,
			initial_refresh_interval_secs: 30,
			throttle_threshold: 2,
			remaining_header: DEFAULT_REMAINING_HEADER.into(),
			refresh_interval_header: DEFAULT_REFRESH_INTERVAL_HEADER.into(),
		}
	}
}

/// Point-in-time copy of the limiter counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitState {
	/// Remaining request budget reported by the last response.
	pub remaining: i64,
	/// Refresh interval in seconds reported by the last response.
	pub refresh_interval_secs: i64,
	/// Number of exchanges that completed at the transport level.
	pub total_requests: u64,
}
impl RateLimitState {
	fn decide(&self, threshold: i64) -> RateLimitDecision {
		if self.remaining > threshold {
			return RateLimitDecision::Allow;
		}

		let secs = u64::try_from(self.refresh_interval_secs).unwrap_or(0);

		RateLimitDecision::Delay(StdDuration::from_secs(secs))
	}
}

/// Outcome of consulting the limiter before a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
	/// The request may proceed immediately.
	Allow,
	/// The request must wait for the given duration first.
	Delay(StdDuration),
}

/// Shared limiter owned by a client.
#[derive(Debug)]
pub struct RateLimiter {
	state: Mutex<RateLimitState>,
	gate: Mutex<()>,
	threshold: i64,
	remaining_header: HeaderName,
	refresh_interval_header: HeaderName,
}
impl RateLimiter {
	/// Builds a limiter, validating the configured header names.
	pub fn new(config: &RateLimitConfig) -> Result<Self, ConfigError> {
		Ok(Self {
			state: Mutex::new(RateLimitState {
				remaining: config.initial_remaining,
				refresh_interval_secs: config.initial_refresh_interval_secs,
				total_requests: 0,
			}),
			gate: Mutex::new(()),
			threshold: config.throttle_threshold,
			remaining_header: header_name(&config.remaining_header)?,
			refresh_interval_header: header_name(&config.refresh_interval_header)?,
		})
	}

	/// Reports whether the next request would be delayed, without waiting.
	pub fn should_throttle(&self) -> RateLimitDecision {
		self.state.lock().decide(self.threshold)
	}

	/// Gate run before every request.
	///
	/// Sleeps for the refresh interval when the budget is exhausted. Concurrent callers
	/// queue behind the sleeper and decide on the counters as they stand once it wakes.
	/// [`Self::record_response`] never waits on a sleeper.
	pub fn throttle(&self) -> RateLimitDecision {
		let _gate = self.gate.lock();
		let (decision, remaining) = {
			let state = self.state.lock();

			(state.decide(self.threshold), state.remaining)
		};

		if let RateLimitDecision::Delay(wait) = decision {
			obs::record_throttle(remaining, wait);
			thread::sleep(wait);
		}

		decision
	}

	/// Updates counters from a completed exchange.
	///
	/// Header values that do not parse as integers are ignored and the previous value is
	/// kept. The total request counter is incremented unconditionally.
	pub fn record_response(&self, headers: &HeaderMap) {
		let remaining = parse_header(headers, &self.remaining_header);
		let refresh = parse_header(headers, &self.refresh_interval_header);
		let mut state = self.state.lock();

		if let Some(value) = remaining {
			state.remaining = value;
		}
		if let Some(value) = refresh {
			state.refresh_interval_secs = value;
		}

		state.total_requests += 1;

		obs::record_rate_limit_update(state.remaining, state.refresh_interval_secs);
	}

	/// Returns a copy of the current counters.
	pub fn snapshot(&self) -> RateLimitState {
		*self.state.lock()
	}
}

fn header_name(raw: &str) -> Result<HeaderName, ConfigError> {
	HeaderName::from_bytes(raw.to_ascii_lowercase().as_bytes())
		.map_err(|source| ConfigError::InvalidHeaderName { name: raw.to_owned(), source })
}

fn parse_header(headers: &HeaderMap, name: &HeaderName) -> Option<i64> {
	headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
