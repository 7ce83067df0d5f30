// self
use crate::{_prelude::*, endpoint::HostVariant, obs::Operation};

/// A span wrapping one facade operation.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the operation and serving host.
	pub fn new(operation: Operation, host: HostVariant) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"constellix_client.request",
				operation = operation.as_str(),
				host = host.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, host);

			Self {}
		}
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> RequestSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RequestSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RequestSpanGuard {}
		}
	}
}

/// RAII guard returned by [`RequestSpan::entered`].
pub struct RequestSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for RequestSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RequestSpanGuard(..)")
	}
}

/// Notes that the gate is about to sleep.
pub fn record_throttle(remaining: i64, wait: StdDuration) {
	#[cfg(feature = "tracing")]
	tracing::warn!(remaining, wait_secs = wait.as_secs(), "Rate limit nearly exhausted; sleeping.");
	#[cfg(not(feature = "tracing"))]
	let _ = (remaining, wait);
	#[cfg(feature = "metrics")]
	metrics::counter!("constellix_client_throttle_total").increment(1);
}

/// Notes the counters after a response was recorded.
pub fn record_rate_limit_update(remaining: i64, refresh_interval_secs: i64) {
	#[cfg(feature = "tracing")]
	tracing::debug!(remaining, refresh_interval_secs, "Rate limit state updated.");
	#[cfg(not(feature = "tracing"))]
	let _ = (remaining, refresh_interval_secs);
}

/// Notes a failed facade operation.
pub fn record_failure(error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(status = error.status(), "Request failed: {error}.");
	#[cfg(not(feature = "tracing"))]
	let _ = error;
}
