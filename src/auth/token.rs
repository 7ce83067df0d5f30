//! Time-based HMAC security tokens sent with every request.
//!
//! A token has the shape `api_key:base64(HMAC-SHA1(secret_key, millis)):millis`, where
//! `millis` is the decimal epoch timestamp in milliseconds. It proves possession of the
//! secret key without transmitting it; replay validation happens server-side.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
// self
use crate::{_prelude::*, auth::SecretKey, error::ConfigError};

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the signed token.
pub const SECURITY_TOKEN_HEADER: &str = "x-cns-security-token";

/// Signed per-request credential. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct SecurityToken(String);
impl SecurityToken {
	/// Returns the wire representation.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Debug for SecurityToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SecurityToken").field(&self.0).finish()
	}
}
impl Display for SecurityToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Signs `now_millis` with the secret key and assembles the token.
///
/// Deterministic for a fixed timestamp. HMAC-SHA1 accepts keys of any length, so the
/// key error only surfaces if the MAC backend changes.
pub fn sign(
	api_key: &str,
	secret_key: &[u8],
	now_millis: i64,
) -> Result<SecurityToken, ConfigError> {
	let millis = now_millis.to_string();
	let mut mac = HmacSha1::new_from_slice(secret_key)
		.map_err(|source| ConfigError::InvalidSecretKey { source })?;

	mac.update(millis.as_bytes());

	let digest = STANDARD.encode(mac.finalize().into_bytes());

	Ok(SecurityToken(format!("{api_key}:{digest}:{millis}")))
}

/// API key and secret pair used to sign requests.
#[derive(Clone, Debug)]
pub struct Credentials {
	/// Public API key placed verbatim in the token.
	pub api_key: String,
	/// Secret key used as HMAC key.
	pub secret_key: SecretKey,
}
impl Credentials {
	/// Creates a new credential pair.
	pub fn new(api_key: impl Into<String>, secret_key: impl Into<SecretKey>) -> Self {
		Self { api_key: api_key.into(), secret_key: secret_key.into() }
	}

	/// Signs the provided timestamp.
	pub fn sign_at(&self, now_millis: i64) -> Result<SecurityToken, ConfigError> {
		sign(&self.api_key, self.secret_key.as_ref(), now_millis)
	}

	/// Signs the current wall-clock time.
	pub fn sign_now(&self) -> Result<SecurityToken, ConfigError> {
		self.sign_at(now_millis())
	}
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
	let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

	i64::try_from(nanos).unwrap_or(i64::MAX)
}
