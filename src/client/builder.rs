// self
use crate::{
	_prelude::*,
	auth::SecretKey,
	client::Client,
	config::ClientConfig,
	http::HttpTransport,
	rate_limit::RateLimitConfig,
};
#[cfg(feature = "reqwest")] use crate::{client::BlockingClient, http::ReqwestTransport};

/// Fluent builder for [`Client`] values.
#[derive(Clone, Debug)]
pub struct ClientBuilder {
	/// Configuration being assembled.
	pub config: ClientConfig,
}
impl ClientBuilder {
	/// Creates a builder seeded with the credential pair and default settings.
	pub fn new(api_key: impl Into<String>, secret_key: impl Into<SecretKey>) -> Self {
		Self { config: ClientConfig::new(api_key, secret_key) }
	}

	/// Disables certificate validation when `insecure` is true.
	pub fn insecure(mut self, insecure: bool) -> Self {
		self.config.insecure = insecure;

		self
	}

	/// Routes every request through the proxy at `url`.
	pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
		self.config.proxy_url = Some(url.into());

		self
	}

	/// Overrides the primary base URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.config.base_url = url.into();

		self
	}

	/// Overrides the alternate hostname.
	pub fn alternate_host(mut self, host: impl Into<String>) -> Self {
		self.config.alternate_host = host.into();

		self
	}

	/// Overrides the rate-limit settings.
	pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
		self.config.rate_limit = rate_limit;

		self
	}

	/// Builds a client that sends requests through `transport`.
	pub fn build_with_transport<T>(self, transport: T) -> Result<Client<T>>
	where
		T: HttpTransport,
	{
		Client::with_transport(self.config, transport)
	}

	/// Builds a client backed by the default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn build(self) -> Result<BlockingClient> {
		let transport = ReqwestTransport::build(&self.config.transport_options())?;

		self.build_with_transport(transport)
	}
}
impl From<ClientConfig> for ClientBuilder {
	fn from(config: ClientConfig) -> Self {
		Self { config }
	}
}
