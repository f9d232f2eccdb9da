// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent and content-type headers.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use tracing::debug;

/// Timeout applied to every request unless the caller overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Creates a new HTTP client builder with the standard Weito headers.
///
/// Every request sent by the resulting client carries:
/// - `User-Agent: weito/{version}`
/// - `Content-Type: application/json`
///
/// Use this when you need to customize the client further.
///
/// # Example
/// ```ignore
/// let client = weito_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder()
		.user_agent(user_agent())
		.default_headers(default_headers())
}

/// Creates a new HTTP client with the standard headers and the given timeout.
pub fn new_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
	debug!(timeout_ms = timeout.as_millis() as u64, "building HTTP client");
	builder().timeout(timeout).build()
}

/// Headers attached to every request.
pub fn default_headers() -> HeaderMap {
	let mut headers = HeaderMap::new();
	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	headers
}

/// Returns the standard Weito User-Agent string.
///
/// Format: `weito/{version}`
pub fn user_agent() -> String {
	format!("weito/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use wiremock::matchers::{header, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 2);
		assert_eq!(parts[0], "weito");
		assert!(!parts[1].is_empty());
	}

	#[test]
	fn default_headers_contain_json_content_type() {
		let headers = default_headers();
		assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
	}

	#[test]
	fn client_builds_with_custom_timeout() {
		assert!(new_client_with_timeout(Duration::from_secs(1)).is_ok());
	}

	#[tokio::test]
	async fn requests_carry_standard_headers() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/ping"))
			.and(header("content-type", "application/json"))
			.and(header("user-agent", user_agent().as_str()))
			.respond_with(ResponseTemplate::new(200))
			.expect(1)
			.mount(&server)
			.await;

		let client = new_client_with_timeout(DEFAULT_TIMEOUT).unwrap();
		let response = client
			.get(format!("{}/ping", server.uri()))
			.send()
			.await
			.unwrap();
		assert_eq!(response.status().as_u16(), 200);
	}
}
