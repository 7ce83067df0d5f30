//! Signed-request client and its create/fetch/update/delete facade.
//!
//! Every operation follows the same path: resolve the endpoint against the primary or
//! alternate host, pass the rate-limit gate, sign and send the request, record the
//! rate-limit headers, then normalize the response with the serving host's policy.
//!
//! A [`Client`] is an ordinary value. Share it across threads with an [`Arc`]; build
//! several when different credentials or hosts are needed.

mod builder;

pub use builder::*;

// crates.io
use http::{Method, header::CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, SECURITY_TOKEN_HEADER, SecretKey},
	config::ClientConfig,
	endpoint::{EndpointResolver, Target},
	error::{ConfigError, TransportError},
	http::{ApiRequest, ApiResponse, HttpTransport},
	normalize::normalize,
	obs::{self, Operation, Outcome, RequestSpan},
	rate_limit::{RateLimitState, RateLimiter},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default blocking reqwest transport.
pub type BlockingClient = Client<ReqwestTransport>;

/// Signed-request client for the primary and alternate API hosts.
pub struct Client<T>
where
	T: HttpTransport,
{
	credentials: Credentials,
	resolver: EndpointResolver,
	limiter: RateLimiter,
	transport: T,
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Starts a builder for the given credential pair.
	pub fn builder(api_key: impl Into<String>, secret_key: impl Into<SecretKey>) -> ClientBuilder {
		ClientBuilder::new(api_key, secret_key)
	}

	/// Builds a client and its reqwest transport from `config`.
	pub fn from_config(config: ClientConfig) -> Result<Self> {
		ClientBuilder::from(config).build()
	}
}
impl<T> Client<T>
where
	T: HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
		config.validate()?;

		Ok(Self {
			credentials: config.credentials(),
			resolver: config.resolver(),
			limiter: RateLimiter::new(&config.rate_limit)?,
			transport,
		})
	}

	/// Underlying transport.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Shared rate limiter.
	pub fn limiter(&self) -> &RateLimiter {
		&self.limiter
	}

	/// Current rate-limit counters.
	pub fn rate_limit(&self) -> RateLimitState {
		self.limiter.snapshot()
	}

	/// Number of exchanges that completed at the transport level.
	pub fn total_requests(&self) -> u64 {
		self.limiter.snapshot().total_requests
	}

	/// Resolves `endpoint` against the configured hosts.
	pub fn resolve(&self, endpoint: &str) -> Target {
		self.resolver.resolve(endpoint)
	}

	/// Sends one signed request to `target` and records the rate-limit headers.
	///
	/// Blocks first if the previous responses exhausted the budget. The payload is only
	/// attached to POST and PUT. The response is returned whatever its status; use
	/// [`normalize`] to turn failures into errors. Transport failures are returned as-is
	/// and leave the rate-limit state untouched.
	pub fn dispatch(
		&self,
		method: Method,
		target: &Target,
		payload: Option<Vec<u8>>,
	) -> Result<ApiResponse> {
		self.limiter.throttle();

		let request = self.build_request(method, target, payload)?;
		let response = self.transport.execute(request).map_err(TransportError::network)?;

		self.limiter.record_response(response.headers());

		Ok(response)
	}

	/// Creates a resource by POSTing `payload` as JSON.
	pub fn create<P>(&self, payload: &P, endpoint: &str) -> Result<ApiResponse>
	where
		P: ?Sized + Serialize,
	{
		self.run(Operation::Create, Method::POST, endpoint, encode(payload).map(Some))
	}

	/// Fetches a resource.
	pub fn fetch(&self, endpoint: &str) -> Result<ApiResponse> {
		self.run(Operation::Fetch, Method::GET, endpoint, Ok(None))
	}

	/// Replaces a resource by PUTting `payload` as JSON.
	pub fn update<P>(&self, payload: &P, endpoint: &str) -> Result<ApiResponse>
	where
		P: ?Sized + Serialize,
	{
		self.run(Operation::Update, Method::PUT, endpoint, encode(payload).map(Some))
	}

	/// Deletes a resource, discarding the response body.
	pub fn delete(&self, endpoint: &str) -> Result<()> {
		self.run(Operation::Delete, Method::DELETE, endpoint, Ok(None)).map(drop)
	}

	fn run(
		&self,
		operation: Operation,
		method: Method,
		endpoint: &str,
		payload: Result<Option<Vec<u8>>>,
	) -> Result<ApiResponse> {
		let target = self.resolve(endpoint);
		let _span = RequestSpan::new(operation, target.host).entered();

		obs::record_outcome(operation, Outcome::Attempt);

		let result = payload
			.and_then(|payload| self.dispatch(method, &target, payload))
			.and_then(|response| normalize(response, target.host));

		match &result {
			Ok(_) => obs::record_outcome(operation, Outcome::Success),
			Err(e) => {
				obs::record_outcome(operation, Outcome::Failure);
				obs::record_failure(e);
			},
		}

		result
	}

	fn build_request(
		&self,
		method: Method,
		target: &Target,
		payload: Option<Vec<u8>>,
	) -> Result<ApiRequest> {
		let body = if method == Method::POST || method == Method::PUT {
			payload.unwrap_or_default()
		} else {
			Vec::new()
		};
		let token = self.credentials.sign_now()?;
		let request = http::Request::builder()
			.method(method)
			.uri(target.url.as_str())
			.header(CONTENT_TYPE, "application/json")
			.header(SECURITY_TOKEN_HEADER, token.as_str())
			.body(body)
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}
impl<T> Debug for Client<T>
where
	T: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("api_key", &self.credentials.api_key)
			.field("resolver", &self.resolver)
			.field("rate_limit", &self.limiter.snapshot())
			.finish()
	}
}

fn encode<P>(payload: &P) -> Result<Vec<u8>>
where
	P: ?Sized + Serialize,
{
	serde_json::to_vec(payload).map_err(|source| Error::Encode { source })
}
