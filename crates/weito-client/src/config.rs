// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration and base URL resolution.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{Result, WeitoError};

/// Base URL used when neither environment variable is set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Environment variable read at compile time.
pub const BUILD_BASE_URL_VAR: &str = "WEITO_BUILD_API_BASE_URL";

/// Environment variable read at runtime.
pub const RUNTIME_BASE_URL_VAR: &str = "WEITO_API_BASE_URL";

const BUILD_BASE_URL: Option<&str> = option_env!("WEITO_BUILD_API_BASE_URL");

/// Picks the base URL: build-time value, then runtime value, then
/// [`DEFAULT_BASE_URL`]. Empty values count as unset.
pub fn resolve_base_url(build_time: Option<&str>, runtime: Option<&str>) -> String {
	build_time
		.filter(|v| !v.is_empty())
		.or(runtime.filter(|v| !v.is_empty()))
		.unwrap_or(DEFAULT_BASE_URL)
		.to_string()
}

/// Immutable settings shared by every request a [`crate::WeitoClient`] sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	base_url: String,
	timeout: Duration,
}

impl ClientConfig {
	/// Creates a config for an explicit base URL with the default timeout.
	///
	/// A trailing `/` is trimmed so endpoint paths can be appended directly.
	pub fn new(base_url: impl Into<String>) -> Result<Self> {
		let raw = base_url.into();
		Url::parse(&raw).map_err(|source| WeitoError::InvalidBaseUrl {
			url: raw.clone(),
			source,
		})?;

		Ok(Self {
			base_url: raw.trim_end_matches('/').to_string(),
			timeout: weito_common_http::DEFAULT_TIMEOUT,
		})
	}

	/// Resolves the base URL from the environment.
	pub fn from_env() -> Result<Self> {
		let runtime = std::env::var(RUNTIME_BASE_URL_VAR).ok();
		let base_url = resolve_base_url(BUILD_BASE_URL, runtime.as_deref());
		debug!(base_url = %base_url, "resolved API base URL");
		Self::new(base_url)
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Joins the base URL and an endpoint path such as `/client/loans/apply/`.
	pub(crate) fn endpoint(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}
}
