//! Endpoint resolution across the primary DNS host and the alternate (Sonar) host.
//!
//! Callers pass either a path relative to the primary base URL (`v1/domains`) or a full
//! URL on the alternate host (`https://api.sonar.constellix.com/rest/api/http`). The
//! alternate host is recognized by exact match on the third `/`-separated segment of the
//! endpoint, i.e. the authority of `scheme://host/...`.

// self
use crate::_prelude::*;

/// Default base URL of the primary DNS API.
pub const DEFAULT_BASE_URL: &str = "https://api.dns.constellix.com/";
/// Default hostname of the alternate (Sonar) API.
pub const DEFAULT_ALTERNATE_HOST: &str = "api.sonar.constellix.com";

/// Backend service that serves a request; selects the error normalization policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostVariant {
	/// Primary DNS API: success is exactly 200, errors come as `{"errors": [..]}`.
	Primary,
	/// Alternate API: success is 200 or 201, errors are raw body text.
	Alternate,
}
impl HostVariant {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HostVariant::Primary => "primary",
			HostVariant::Alternate => "alternate",
		}
	}

	/// Whether `status` counts as success for this host.
	pub const fn is_success(self, status: u16) -> bool {
		match self {
			HostVariant::Primary => status == 200,
			HostVariant::Alternate => status == 200 || status == 201,
		}
	}
}
impl Display for HostVariant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully resolved request target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
	/// Absolute URL the request is sent to.
	pub url: String,
	/// Host variant serving the URL.
	pub host: HostVariant,
}

/// Maps caller endpoints onto absolute URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointResolver {
	base_url: String,
	alternate_host: String,
}
impl EndpointResolver {
	/// Creates a resolver; a trailing `/` is appended to `base_url` when missing.
	pub fn new(base_url: impl Into<String>, alternate_host: impl Into<String>) -> Self {
		let mut base_url = base_url.into();

		if !base_url.ends_with('/') {
			base_url.push('/');
		}

		Self { base_url, alternate_host: alternate_host.into() }
	}

	/// Primary base URL, always ending with `/`.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Hostname recognized as the alternate host.
	pub fn alternate_host(&self) -> &str {
		&self.alternate_host
	}

	/// Resolves `endpoint` into a [`Target`].
	///
	/// Alternate-host endpoints are used verbatim. Everything else is appended to the
	/// primary base URL with exactly one separator in between.
	pub fn resolve(&self, endpoint: &str) -> Target {
		if self.is_alternate(endpoint) {
			return Target { url: endpoint.to_owned(), host: HostVariant::Alternate };
		}

		let path = endpoint.trim_start_matches('/');

		Target { url: format!("{}{path}", self.base_url), host: HostVariant::Primary }
	}

	fn is_alternate(&self, endpoint: &str) -> bool {
		endpoint.split('/').nth(2).is_some_and(|host| host == self.alternate_host)
	}
}
impl Default for EndpointResolver {
	fn default() -> Self {
		Self::new(DEFAULT_BASE_URL, DEFAULT_ALTERNATE_HOST)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn relative_endpoints_join_base_with_single_separator() {
		let resolver = EndpointResolver::default();

		for endpoint in ["v1/domains/42", "/v1/domains/42", "//v1/domains/42"] {
			let target = resolver.resolve(endpoint);

			assert_eq!(target.url, "https://api.dns.constellix.com/v1/domains/42");
			assert_eq!(target.host, HostVariant::Primary);
		}
	}

	#[test]
	fn base_without_trailing_slash_is_normalized() {
		let resolver = EndpointResolver::new("http://127.0.0.1:8080", DEFAULT_ALTERNATE_HOST);

		assert_eq!(resolver.base_url(), "http://127.0.0.1:8080/");
		assert_eq!(resolver.resolve("v1/domains").url, "http://127.0.0.1:8080/v1/domains");
	}

	#[test]
	fn alternate_host_endpoints_are_used_verbatim() {
		let resolver = EndpointResolver::default();
		let endpoint = "https://api.sonar.constellix.com/rest/api/http/7";
		let target = resolver.resolve(endpoint);

		assert_eq!(target.url, endpoint);
		assert_eq!(target.host, HostVariant::Alternate);
	}

	#[test]
	fn alternate_match_requires_exact_host_segment() {
		let resolver = EndpointResolver::default();

		// Host appears, but not as the authority segment.
		let target = resolver.resolve("v1/api.sonar.constellix.com/checks");

		assert_eq!(target.host, HostVariant::Primary);

		let target = resolver.resolve("https://api.sonar.constellix.com.evil.test/rest");

		assert_eq!(target.host, HostVariant::Primary);
	}

	#[test]
	fn success_codes_differ_per_host() {
		assert!(HostVariant::Primary.is_success(200));
		assert!(!HostVariant::Primary.is_success(201));
		assert!(HostVariant::Alternate.is_success(200));
		assert!(HostVariant::Alternate.is_success(201));
		assert!(!HostVariant::Alternate.is_success(204));
	}
}
