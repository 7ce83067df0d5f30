//! Secret key wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted API secret key keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);
impl SecretKey {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner key material. Callers must avoid logging this value.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<[u8]> for SecretKey {
	fn as_ref(&self) -> &[u8] {
		self.0.as_bytes()
	}
}
impl From<&str> for SecretKey {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for SecretKey {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SecretKey").field(&"<redacted>").finish()
	}
}
impl Display for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
