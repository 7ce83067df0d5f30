//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every facade operation inside a `constellix_client.request` span
//!   with `operation` and `host` fields, and to emit events for throttling and rate-limit
//!   updates.
//! - Enable `metrics` to increment `constellix_client_request_total` for every
//!   attempt/success/failure, labeled by `operation` + `outcome`, and
//!   `constellix_client_throttle_total` whenever the gate sleeps.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Facade operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// POST with a JSON payload.
	Create,
	/// GET.
	Fetch,
	/// PUT with a JSON payload.
	Update,
	/// DELETE.
	Delete,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Create => "create",
			Operation::Fetch => "fetch",
			Operation::Update => "update",
			Operation::Delete => "delete",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a facade operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
