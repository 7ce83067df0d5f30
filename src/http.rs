//! Transport primitives for signed API calls.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. The default
//! [`ReqwestTransport`] wraps a blocking reqwest client configured by
//! [`TransportOptions`]; tests and embedders can plug in their own implementation.

// crates.io
#[cfg(feature = "reqwest")] use reqwest::{Proxy, blocking::Client as BlockingClient};
#[cfg(feature = "reqwest")]
use rustls::{
	ClientConfig as TlsConfig, DigitallySignedStruct, Error as TlsError, RootCertStore,
	SignatureScheme,
	client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
	crypto::{self, CryptoProvider, ring},
	pki_types::{CertificateDer, ServerName, UnixTime},
	version::TLS12,
};
// self
use crate::{_prelude::*, error::ConfigError};

/// Outbound request handed to a transport. Empty body for GET/DELETE.
pub type ApiRequest = http::Request<Vec<u8>>;
/// Raw response returned to callers: status, headers, and the full body.
pub type ApiResponse = http::Response<Vec<u8>>;

/// Abstraction over blocking HTTP transports.
///
/// Implementations must be `Send + Sync + 'static` so a single client can be shared
/// across threads behind an [`Arc`]. A call blocks the current thread until the full
/// response is available. No retries happen at this layer.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and returns the complete response.
	fn execute(&self, request: ApiRequest) -> Result<ApiResponse, Self::TransportError>;
}
impl<T> HttpTransport for Arc<T>
where
	T: ?Sized + HttpTransport,
{
	type TransportError = T::TransportError;

	fn execute(&self, request: ApiRequest) -> Result<ApiResponse, Self::TransportError> {
		(**self).execute(request)
	}
}

/// TLS and proxy settings applied when building the default transport.
///
/// See [`tls_config`] for the protocol and cipher-suite policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportOptions {
	/// Disables certificate validation. Opt-in escape hatch, never a default.
	pub insecure: bool,
	/// Proxy applied to every scheme. Without one, requests go direct.
	pub proxy_url: Option<String>,
}
impl TransportOptions {
	/// Enables or disables certificate validation.
	pub fn insecure(mut self, insecure: bool) -> Self {
		self.insecure = insecure;

		self
	}

	/// Routes every request through `url`.
	pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
		self.proxy_url = Some(url.into());

		self
	}

	/// Parses the proxy URL, if any.
	pub fn parsed_proxy(&self) -> Result<Option<Url>, ConfigError> {
		self.proxy_url
			.as_deref()
			.map(|raw| {
				Url::parse(raw)
					.map_err(|source| ConfigError::InvalidProxyUrl { url: raw.to_owned(), source })
			})
			.transpose()
	}
}

/// Thin wrapper around a blocking reqwest client.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub BlockingClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing blocking reqwest client.
	pub fn with_client(client: BlockingClient) -> Self {
		Self(client)
	}

	/// Builds a transport from [`TransportOptions`].
	///
	/// Fails when the proxy URL does not parse or reqwest rejects the TLS settings;
	/// callers treat this as a startup failure.
	pub fn build(options: &TransportOptions) -> Result<Self, ConfigError> {
		let mut builder =
			BlockingClient::builder().use_preconfigured_tls(tls_config(options.insecure)?);

		// Environment proxy variables are ignored; only an explicit proxy applies.
		builder = match options.parsed_proxy()? {
			Some(proxy) => builder.proxy(Proxy::all(proxy.as_str())?),
			None => builder.no_proxy(),
		};

		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> Result<ApiResponse, Self::TransportError> {
		let response = self.0.execute(request.try_into()?)?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let mut response_new = ApiResponse::new(response.bytes()?.to_vec());

		*response_new.status_mut() = status;
		*response_new.headers_mut() = headers;

		Ok(response_new)
	}
}

/// Builds the rustls client configuration used by [`ReqwestTransport`].
///
/// Only TLS 1.2 is negotiated, with the ECDHE-RSA AES-GCM suites in preference order.
/// The API's allow-list also names `TLS_ECDHE_RSA_WITH_AES_{128,256}_CBC_SHA` and
/// `TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256`; rustls implements no CBC suites, so those
/// cannot be offered. rustls has no TLS 1.1 either, so TLS 1.2 is the whole range.
///
/// With `insecure`, the server certificate chain and name are not checked. Handshake
/// signatures are still verified.
#[cfg(feature = "reqwest")]
pub fn tls_config(insecure: bool) -> Result<TlsConfig, ConfigError> {
	let provider = Arc::new(CryptoProvider {
		cipher_suites: vec![
			ring::cipher_suite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
			ring::cipher_suite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
		],
		..ring::default_provider()
	});
	let builder = TlsConfig::builder_with_provider(provider.clone())
		.with_protocol_versions(&[&TLS12])
		.map_err(|source| ConfigError::Tls { source })?;
	let config = if insecure {
		builder
			.dangerous()
			.with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate(provider)))
			.with_no_client_auth()
	} else {
		let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

		builder.with_root_certificates(roots).with_no_client_auth()
	};

	Ok(config)
}

#[cfg(feature = "reqwest")]
#[derive(Debug)]
struct AcceptAnyCertificate(Arc<CryptoProvider>);
#[cfg(feature = "reqwest")]
impl ServerCertVerifier for AcceptAnyCertificate {
	fn verify_server_cert(
		&self,
		_end_entity: &CertificateDer<'_>,
		_intermediates: &[CertificateDer<'_>],
		_server_name: &ServerName<'_>,
		_ocsp_response: &[u8],
		_now: UnixTime,
	) -> Result<ServerCertVerified, TlsError> {
		Ok(ServerCertVerified::assertion())
	}

	fn verify_tls12_signature(
		&self,
		message: &[u8],
		cert: &CertificateDer<'_>,
		dss: &DigitallySignedStruct,
	) -> Result<HandshakeSignatureValid, TlsError> {
		crypto::verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
	}

	fn verify_tls13_signature(
		&self,
		message: &[u8],
		cert: &CertificateDer<'_>,
		dss: &DigitallySignedStruct,
	) -> Result<HandshakeSignatureValid, TlsError> {
		crypto::verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
	}

	fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
		self.0.signature_verification_algorithms.supported_schemes()
	}
}
