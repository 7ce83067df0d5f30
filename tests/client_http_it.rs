// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use constellix_client::{
	client::{BlockingClient, ClientBuilder},
	endpoint::HostVariant,
	error::Error,
	rate_limit::RateLimitState,
};

// The mock server answers plain HTTP and TLS on the same port. Its certificate carries an
// ECDSA key, which the client's ECDHE-RSA-only suite list cannot negotiate with.
fn plain_url(server: &MockServer, path: &str) -> String {
	format!("http://{}{path}", server.address())
}

fn primary_client(server: &MockServer) -> BlockingClient {
	ClientBuilder::new("test-api-key", "test-secret-key")
		.base_url(plain_url(server, "/"))
		.build()
		.expect("Failed to build primary-host test client.")
}

fn alternate_client(server: &MockServer) -> BlockingClient {
	ClientBuilder::new("test-api-key", "test-secret-key")
		.base_url("https://primary.invalid/")
		.alternate_host(server.address().to_string())
		.build()
		.expect("Failed to build alternate-host test client.")
}

#[test]
fn fetch_sends_signed_json_request_to_primary_host() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/v1/domains/42")
			.header("content-type", "application/json")
			.header_exists("x-cns-security-token");
		then.status(200).body(r#"{"id":42}"#);
	});
	let client = primary_client(&server);
	let response = client.fetch("v1/domains/42").expect("Fetch should succeed on HTTP 200.");

	mock.assert();
	assert_eq!(response.status(), 200);
	assert_eq!(response.body(), br#"{"id":42}"#);
	assert_eq!(client.total_requests(), 1);
}

#[test]
fn create_and_update_send_json_payloads() {
	let server = MockServer::start();
	let payload = json!({ "names": ["example.com"], "ttl": 300 });
	let create = server.mock(|when, then| {
		when.method(POST).path("/v1/domains").json_body(payload.clone());
		then.status(200).body("[]");
	});
	let update = server.mock(|when, then| {
		when.method(PUT).path("/v1/domains/7").json_body(payload.clone());
		then.status(200).body("{}");
	});
	let client = primary_client(&server);

	client.create(&payload, "/v1/domains").expect("Create should succeed on HTTP 200.");
	client.update(&payload, "v1/domains/7").expect("Update should succeed on HTTP 200.");

	create.assert();
	update.assert();
	assert_eq!(client.total_requests(), 2);
}

#[test]
fn primary_errors_are_concatenated() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST).path("/v1/domains");
		then.status(422).body(r#"{"errors":["bad domain","bad ttl"]}"#);
	});
	let client = primary_client(&server);
	let err = client
		.create(&json!({ "names": ["bad"] }), "v1/domains")
		.expect_err("HTTP 422 should be reported as an error.");

	mock.assert();
	assert_eq!(err.to_string(), "bad domainbad ttl");

	match err {
		Error::Api(api) => {
			assert_eq!(api.status, 422);
			assert_eq!(api.host, HostVariant::Primary);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	// Error responses still count as completed exchanges.
	assert_eq!(client.total_requests(), 1);
}

#[test]
fn primary_treats_201_as_failure_with_raw_fallback() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(GET).path("/v1/odd");
		then.status(201).body("created?");
	});

	let err = primary_client(&server)
		.fetch("v1/odd")
		.expect_err("The primary host only accepts HTTP 200.");

	assert_eq!(err.to_string(), "created?");
	assert_eq!(err.status(), Some(201));
}

#[test]
fn delete_discards_body_and_reports_errors() {
	let server = MockServer::start();
	let gone = server.mock(|when, then| {
		when.method(DELETE).path("/v1/domains/1");
		then.status(200).body("ignored");
	});
	let missing = server.mock(|when, then| {
		when.method(DELETE).path("/v1/domains/2");
		then.status(404).body(r#"{"errors":["not found"]}"#);
	});
	let client = primary_client(&server);

	client.delete("v1/domains/1").expect("Delete should succeed on HTTP 200.");

	let err = client.delete("v1/domains/2").expect_err("HTTP 404 should be reported.");

	gone.assert();
	missing.assert();
	assert_eq!(err.to_string(), "not found");
}

#[test]
fn alternate_host_endpoints_bypass_base_url() {
	let server = MockServer::start();
	let created = server.mock(|when, then| {
		when.method(POST).path("/rest/api/http");
		then.status(201).body(r#"{"id":9}"#);
	});
	let rejected = server.mock(|when, then| {
		when.method(PUT).path("/rest/api/http/9");
		then.status(400).body("oops");
	});
	let client = alternate_client(&server);
	let response = client
		.create(&json!({ "name": "check" }), &plain_url(&server, "/rest/api/http"))
		.expect("HTTP 201 is a success on the alternate host.");

	assert_eq!(response.status(), 201);

	let err = client
		.update(&json!({ "name": "check" }), &plain_url(&server, "/rest/api/http/9"))
		.expect_err("HTTP 400 should be reported.");

	created.assert();
	rejected.assert();
	assert_eq!(err.to_string(), "oops");
	assert!(matches!(err, Error::Api(ref api) if api.host == HostVariant::Alternate));
}

#[test]
fn rate_limit_headers_update_state() -> color_eyre::Result<()> {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(GET).path("/v1/domains");
		then.status(200)
			.header("requestsRemainingHeader", "17")
			.header("requestRefreshInterval", "5")
			.body("[]");
	});

	let client = primary_client(&server);

	client.fetch("v1/domains")?;

	assert_eq!(
		client.rate_limit(),
		RateLimitState { remaining: 17, refresh_interval_secs: 5, total_requests: 1 }
	);

	Ok(())
}

#[test]
fn transport_failures_are_returned_without_bookkeeping() {
	let client = ClientBuilder::new("test-api-key", "test-secret-key")
		.base_url("http://127.0.0.1:1/")
		.build()
		.expect("Failed to build test client.");
	let err = client.fetch("v1/domains").expect_err("Nothing listens on port 1.");

	assert!(matches!(err, Error::Transport(_)));
	assert_eq!(client.total_requests(), 0);
}

#[test]
fn tls_refuses_servers_without_ecdhe_rsa_suites() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/v1/domains");
		then.status(200).body("[]");
	});

	for insecure in [false, true] {
		let client = ClientBuilder::new("test-api-key", "test-secret-key")
			.base_url(server.base_url())
			.insecure(insecure)
			.build()
			.expect("Failed to build HTTPS test client.");
		let err = client.fetch("v1/domains").expect_err("The ECDSA-only handshake must fail.");

		assert!(matches!(err, Error::Transport(_)));
		assert_eq!(client.total_requests(), 0);
	}

	mock.assert_calls(0);
}

#[test]
fn bad_proxy_url_fails_construction() {
	let err = ClientBuilder::new("test-api-key", "test-secret-key")
		.proxy_url("not a url")
		.build()
		.expect_err("An unparsable proxy URL must be rejected at startup.");

	assert!(matches!(err, Error::Config(_)));
}
