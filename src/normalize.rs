//! Maps non-success responses onto [`ApiError`] using the policy of the serving host.
//!
//! - Primary host: only 200 succeeds. Error bodies look like `{"errors": ["..", ".."]}`
//!   and the messages are concatenated without a separator. Bodies that are not JSON or
//!   lack a string array under `errors` fall back to the raw body text.
//! - Alternate host: 200 and 201 succeed. The raw body is the error message.
//!
//! The response is consumed on failure; its body moves into the error.

// self
use crate::{_prelude::*, endpoint::HostVariant, error::ApiError, http::ApiResponse};

#[derive(Deserialize)]
struct ErrorList {
	errors: Vec<String>,
}

/// Returns the response untouched on success, or the normalized error.
pub fn normalize(response: ApiResponse, host: HostVariant) -> Result<ApiResponse> {
	let status = response.status().as_u16();

	if host.is_success(status) {
		return Ok(response);
	}

	let body = String::from_utf8_lossy(response.body()).into_owned();
	let message = match host {
		HostVariant::Primary => primary_message(&body).unwrap_or_else(|| body.clone()),
		HostVariant::Alternate => body.clone(),
	};

	Err(ApiError { host, status, message, body }.into())
}

fn primary_message(body: &str) -> Option<String> {
	serde_json::from_str::<ErrorList>(body).ok().map(|list| list.errors.concat())
}
