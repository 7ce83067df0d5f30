//! Client-level error types shared by the signer, transport, rate limiter, and facade.

// self
use crate::{_prelude::*, endpoint::HostVariant};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, body read).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request payload could not be encoded as JSON.
	#[error("Request payload could not be encoded as JSON.")]
	Encode {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// The API answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
}
impl Error {
	/// Returns the HTTP status reported by the API, when the failure came from a response.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(e) => Some(e.status),
			_ => None,
		}
	}
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed (bad method, URL, or header value).
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Primary base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Rejected value.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Proxy URL cannot be parsed.
	#[error("Proxy URL `{url}` is invalid.")]
	InvalidProxyUrl {
		/// Rejected value.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Secret key was rejected by the HMAC implementation.
	#[error("Secret key cannot be used as an HMAC key.")]
	InvalidSecretKey {
		/// Underlying key-length failure.
		#[source]
		source: hmac::digest::InvalidLength,
	},
	/// TLS settings were rejected while building the transport.
	#[cfg(feature = "reqwest")]
	#[error("TLS configuration is invalid.")]
	Tls {
		/// Underlying rustls failure.
		#[source]
		source: rustls::Error,
	},
	/// Rate-limit header name is not a valid HTTP header name.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Rejected value.
		name: String,
		/// Underlying parsing failure.
		#[source]
		source: http::header::InvalidHeaderName,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Non-success response normalized into a single message.
///
/// The rendered message is exactly the server-provided text, so callers that only
/// print errors see the same output regardless of which host answered. The status and
/// raw body stay available for diagnosis.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ApiError {
	/// Host variant that served the response.
	pub host: HostVariant,
	/// HTTP status code.
	pub status: u16,
	/// Normalized message.
	pub message: String,
	/// Raw response body, decoded lossily as UTF-8.
	pub body: String,
}
