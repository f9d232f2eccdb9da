// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Weito API client implementation.

use std::sync::OnceLock;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, error, instrument};
use weito_common_secret::SecretString;

use crate::config::ClientConfig;
use crate::error::{Result, WeitoError};
use crate::types::{OtpRequest, OtpVerifyRequest};

/// Endpoint paths, relative to the configured base URL.
pub mod paths {
	pub const HEALTH: &str = "/health/";
	pub const REQUEST_OTP: &str = "/client/auth/request-otp/";
	pub const VERIFY_OTP: &str = "/client/auth/verify-otp/";
	pub const APPLY_LOAN: &str = "/client/loans/apply/";
	pub const LOAN_SUMMARY: &str = "/client/loans/summary/";
	pub const PAYMENT_HISTORY: &str = "/client/payments/history/";
	pub const STK_PUSH: &str = "/mpesa/stk-push/";
}

static SHARED: OnceLock<WeitoClient> = OnceLock::new();

/// Returns the process-wide client, configured from the environment on
/// first use.
pub fn shared() -> Result<&'static WeitoClient> {
	if let Some(client) = SHARED.get() {
		return Ok(client);
	}
	let client = WeitoClient::from_env()?;
	Ok(SHARED.get_or_init(|| client))
}

/// Client for the Weito lending API.
///
/// Every method sends exactly one request and returns the raw response.
/// Non-2xx responses come back untouched inside [`WeitoError::Status`].
#[derive(Debug, Clone)]
pub struct WeitoClient {
	http: Client,
	config: ClientConfig,
}

impl WeitoClient {
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http = weito_common_http::new_client_with_timeout(config.timeout())?;
		Ok(Self { http, config })
	}

	/// Creates a client whose base URL is resolved from the environment.
	pub fn from_env() -> Result<Self> {
		Self::new(ClientConfig::from_env()?)
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// `GET /health/`
	#[instrument(skip(self))]
	pub async fn health_check(&self) -> Result<Response> {
		self.send(self.http.get(self.config.endpoint(paths::HEALTH)))
			.await
	}

	/// `POST /client/auth/request-otp/`
	#[instrument(skip_all)]
	pub async fn request_otp(&self, phone_number: &str) -> Result<Response> {
		let body = OtpRequest { phone_number };
		let request = self
			.http
			.post(self.config.endpoint(paths::REQUEST_OTP))
			.json(&body);
		self.send(request).await
	}

	/// `POST /client/auth/verify-otp/`
	#[instrument(skip_all)]
	pub async fn verify_otp(&self, phone_number: &str, otp: &str) -> Result<Response> {
		let body = OtpVerifyRequest { phone_number, otp };
		let request = self
			.http
			.post(self.config.endpoint(paths::VERIFY_OTP))
			.json(&body);
		self.send(request).await
	}

	/// `POST /client/loans/apply/` with the payload forwarded as-is.
	#[instrument(skip_all, fields(authenticated = token.is_some()))]
	pub async fn apply_loan<P>(&self, token: Option<&SecretString>, payload: &P) -> Result<Response>
	where
		P: Serialize + ?Sized,
	{
		let request = self
			.http
			.post(self.config.endpoint(paths::APPLY_LOAN))
			.json(payload);
		self.send(authorize(request, token)).await
	}

	/// `GET /client/loans/summary/`
	#[instrument(skip_all, fields(authenticated = token.is_some()))]
	pub async fn get_loan_summary(&self, token: Option<&SecretString>) -> Result<Response> {
		let request = self.http.get(self.config.endpoint(paths::LOAN_SUMMARY));
		self.send(authorize(request, token)).await
	}

	/// `GET /client/payments/history/`
	#[instrument(skip_all, fields(authenticated = token.is_some()))]
	pub async fn get_payment_history(&self, token: Option<&SecretString>) -> Result<Response> {
		let request = self.http.get(self.config.endpoint(paths::PAYMENT_HISTORY));
		self.send(authorize(request, token)).await
	}

	/// `POST /mpesa/stk-push/` with the payload forwarded as-is.
	#[instrument(skip_all)]
	pub async fn trigger_stk_push<P>(&self, payload: &P) -> Result<Response>
	where
		P: Serialize + ?Sized,
	{
		let request = self
			.http
			.post(self.config.endpoint(paths::STK_PUSH))
			.json(payload);
		self.send(request).await
	}

	async fn send(&self, request: RequestBuilder) -> Result<Response> {
		let response = request.send().await.map_err(|e| {
			if e.is_timeout() {
				error!(timeout = ?self.config.timeout(), "request timed out");
			} else {
				error!(error = %e, "network error");
			}
			e
		})?;

		let status = response.status();
		debug!(status = %status, url = %response.url(), "received response");

		if !status.is_success() {
			return Err(WeitoError::Status { status, response });
		}
		Ok(response)
	}
}

fn authorize(request: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
	match token {
		Some(token) => request.bearer_auth(token.expose()),
		None => request,
	}
}
