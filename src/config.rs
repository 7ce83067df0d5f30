//! Caller-owned client configuration.
//!
//! A [`ClientConfig`] can be deserialized from any serde format or assembled through
//! [`ClientBuilder`](crate::client::ClientBuilder). Every client built from it is
//! independent; there is no process-wide instance.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, SecretKey},
	endpoint::{DEFAULT_ALTERNATE_HOST, DEFAULT_BASE_URL, EndpointResolver},
	error::ConfigError,
	http::TransportOptions,
	rate_limit::RateLimitConfig,
};

/// Settings required to build a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Public API key.
	pub api_key: String,
	/// Secret key used to sign every request.
	pub secret_key: SecretKey,
	/// Disables certificate validation.
	#[serde(default)]
	pub insecure: bool,
	/// Optional proxy applied to every request.
	#[serde(default)]
	pub proxy_url: Option<String>,
	/// Base URL prefixed to relative endpoints.
	#[serde(default = "default_base_url")]
	pub base_url: String,
	/// Hostname whose endpoints are passed through verbatim.
	#[serde(default = "default_alternate_host")]
	pub alternate_host: String,
	/// Rate-limit tracking settings.
	#[serde(default)]
	pub rate_limit: RateLimitConfig,
}
impl ClientConfig {
	/// Creates a configuration with default hosts and rate-limit settings.
	pub fn new(api_key: impl Into<String>, secret_key: impl Into<SecretKey>) -> Self {
		Self {
			api_key: api_key.into(),
			secret_key: secret_key.into(),
			insecure: false,
			proxy_url: None,
			base_url: default_base_url(),
			alternate_host: default_alternate_host(),
			rate_limit: RateLimitConfig::default(),
		}
	}

	/// Checks the base and proxy URLs.
	pub fn validate(&self) -> Result<(), ConfigError> {
		Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
			url: self.base_url.clone(),
			source,
		})?;
		self.transport_options().parsed_proxy()?;

		Ok(())
	}

	/// Credential pair used by the signer.
	pub fn credentials(&self) -> Credentials {
		Credentials::new(self.api_key.clone(), self.secret_key.clone())
	}

	/// Resolver for the configured hosts.
	pub fn resolver(&self) -> EndpointResolver {
		EndpointResolver::new(self.base_url.clone(), self.alternate_host.clone())
	}

	/// TLS and proxy options for the default transport.
	pub fn transport_options(&self) -> TransportOptions {
		TransportOptions { insecure: self.insecure, proxy_url: self.proxy_url.clone() }
	}
}

fn default_base_url() -> String {
	DEFAULT_BASE_URL.into()
}

fn default_alternate_host() -> String {
	DEFAULT_ALTERNATE_HOST.into()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn minimal_json_uses_defaults() {
		let config: ClientConfig =
			serde_json::from_str(r#"{"api_key":"key","secret_key":"secret"}"#)
				.expect("Minimal config should deserialize.");

		assert_eq!(config, ClientConfig::new("key", "secret"));
		assert_eq!(config.base_url, DEFAULT_BASE_URL);
		assert_eq!(config.rate_limit.initial_remaining, 30);
		config.validate().expect("Default config should validate.");
	}

	#[test]
	fn nested_rate_limit_overrides_merge_with_defaults() {
		let config: ClientConfig = serde_json::from_str(
			r#"{"api_key":"key","secret_key":"secret","rate_limit":{"throttle_threshold":5}}"#,
		)
		.expect("Partial rate-limit config should deserialize.");

		assert_eq!(config.rate_limit.throttle_threshold, 5);
		assert_eq!(config.rate_limit.initial_refresh_interval_secs, 30);
	}

	#[test]
	fn debug_output_redacts_secret() {
		let rendered = format!("{:?}", ClientConfig::new("key", "hunter2"));

		assert!(!rendered.contains("hunter2"));
	}

	#[test]
	fn invalid_urls_fail_validation() {
		let mut config = ClientConfig::new("key", "secret");

		config.base_url = "relative/path".into();

		assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseUrl { .. })));

		config.base_url = DEFAULT_BASE_URL.into();
		config.proxy_url = Some("not a proxy".into());

		assert!(matches!(config.validate(), Err(ConfigError::InvalidProxyUrl { .. })));
	}
}
