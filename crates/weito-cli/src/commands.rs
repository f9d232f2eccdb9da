// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Response;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use weito_client::types::{Amount, LoanApplication, StkPushRequest};
use weito_client::{ClientConfig, WeitoClient, WeitoError};
use weito_common_secret::SecretString;

use crate::args::{Args, Command};

/// A non-2xx answer, with the body the backend sent.
#[derive(Debug, Error)]
#[error("Weito API returned {status}: {body}")]
pub struct ApiFailure {
	pub status: u16,
	pub body: Value,
}

/// Uses the shared client unless the command line overrides its settings.
pub fn build_client(args: &Args) -> Result<WeitoClient> {
	if args.base_url.is_none() && args.timeout_secs.is_none() {
		return Ok(weito_client::shared()?.clone());
	}

	let mut config = match &args.base_url {
		Some(url) => ClientConfig::new(url.clone())?,
		None => ClientConfig::from_env()?,
	};
	if let Some(secs) = args.timeout_secs {
		config = config.with_timeout(Duration::from_secs(secs));
	}
	Ok(WeitoClient::new(config)?)
}

#[instrument(skip_all, fields(command = command.name()))]
pub async fn run(
	client: &WeitoClient,
	command: Command,
	token: Option<&SecretString>,
) -> Result<Value> {
	if command.requires_token() && token.map_or(true, |t| t.is_empty()) {
		bail!("this command needs a bearer token: pass --token or set WEITO_TOKEN");
	}

	let result = match command {
		Command::Health => client.health_check().await,
		Command::RequestOtp { phone } => client.request_otp(&phone).await,
		Command::VerifyOtp { phone, otp } => client.verify_otp(&phone, &otp).await,
		Command::ApplyLoan { amount, due_date } => {
			let application = LoanApplication {
				amount: Amount::new(amount),
				due_date,
			};
			client.apply_loan(token, &application).await
		}
		Command::LoanSummary => client.get_loan_summary(token).await,
		Command::Payments => client.get_payment_history(token).await,
		Command::StkPush {
			loan_id,
			phone,
			amount,
		} => {
			let payload = StkPushRequest {
				loan_id,
				phone,
				amount: Amount::new(amount),
			};
			client.trigger_stk_push(&payload).await
		}
	};

	let response = match result {
		Ok(response) => response,
		Err(WeitoError::Status { status, response }) => {
			let body = body_json(response).await?;
			return Err(ApiFailure {
				status: status.as_u16(),
				body,
			}
			.into());
		}
		Err(e) => return Err(anyhow::Error::new(e).context("request to Weito API failed")),
	};

	body_json(response).await
}

/// Reads a response body as JSON; empty bodies become `null` and non-JSON
/// bodies a string.
async fn body_json(response: Response) -> Result<Value> {
	let status = response.status();
	let text = response
		.text()
		.await
		.context("failed to read response body")?;
	debug!(status = %status, bytes = text.len(), "read response body");

	if text.trim().is_empty() {
		return Ok(Value::Null);
	}
	Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::io;
	use std::sync::{Arc, Mutex};
	use wiremock::matchers::{body_json as body_matches, header, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	async fn setup() -> (MockServer, WeitoClient) {
		let server = MockServer::start().await;
		let config = ClientConfig::new(format!("{}/api", server.uri())).unwrap();
		(server, WeitoClient::new(config).unwrap())
	}

	#[tokio::test]
	async fn authenticated_command_without_token_sends_nothing() {
		let (server, client) = setup().await;

		let err = run(&client, Command::LoanSummary, None).await.unwrap_err();
		assert!(err.to_string().contains("bearer token"));
		assert!(server.received_requests().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn empty_token_is_rejected() {
		let (_server, client) = setup().await;
		let token = SecretString::from("");

		assert!(run(&client, Command::Payments, Some(&token)).await.is_err());
	}

	#[tokio::test]
	async fn apply_loan_sends_typed_body() {
		let (server, client) = setup().await;
		Mock::given(method("POST"))
			.and(path("/api/client/loans/apply/"))
			.and(header("authorization", "Bearer tok_abc"))
			.and(body_matches(json!({ "amount": "2500.00", "due_date": "2025-03-31" })))
			.respond_with(ResponseTemplate::new(201).set_body_json(json!({ "loan_id": 12 })))
			.expect(1)
			.mount(&server)
			.await;

		let token = SecretString::from("tok_abc");
		let command = Command::ApplyLoan {
			amount: "2500.00".to_string(),
			due_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
		};
		let body = run(&client, command, Some(&token)).await.unwrap();
		assert_eq!(body, json!({ "loan_id": 12 }));
	}

	#[tokio::test]
	async fn stk_push_sends_typed_body() {
		let (server, client) = setup().await;
		Mock::given(method("POST"))
			.and(path("/api/mpesa/stk-push/"))
			.and(body_matches(json!({ "loan_id": 7, "phone": "254700000000", "amount": "500.00" })))
			.respond_with(ResponseTemplate::new(200))
			.expect(1)
			.mount(&server)
			.await;

		let command = Command::StkPush {
			loan_id: 7,
			phone: "254700000000".to_string(),
			amount: "500.00".to_string(),
		};
		let body = run(&client, command, None).await.unwrap();
		assert_eq!(body, Value::Null);
	}

	#[tokio::test]
	async fn non_json_body_is_returned_as_string() {
		let (server, client) = setup().await;
		Mock::given(method("GET"))
			.and(path("/api/health/"))
			.respond_with(ResponseTemplate::new(200).set_body_string("ok"))
			.mount(&server)
			.await;

		let body = run(&client, Command::Health, None).await.unwrap();
		assert_eq!(body, Value::String("ok".to_string()));
	}

	#[tokio::test]
	async fn error_status_fails_the_command() {
		let (server, client) = setup().await;
		Mock::given(method("POST"))
			.and(path("/api/client/auth/verify-otp/"))
			.respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "Invalid OTP" })))
			.mount(&server)
			.await;

		let command = Command::VerifyOtp {
			phone: "254700000000".to_string(),
			otp: "000000".to_string(),
		};
		let err = run(&client, command, None).await.unwrap_err();
		let failure = err.downcast_ref::<ApiFailure>().unwrap();
		assert_eq!(failure.status, 400);
		assert_eq!(failure.body, json!({ "detail": "Invalid OTP" }));
		assert!(err.to_string().contains("Invalid OTP"));
	}

	#[derive(Clone, Default)]
	struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

	impl io::Write for CapturedLogs {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.0.lock().unwrap().extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	#[tokio::test]
	async fn logs_never_contain_otp_or_phone() {
		let (server, client) = setup().await;
		Mock::given(method("POST"))
			.and(path("/api/client/auth/verify-otp/"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "t" })))
			.mount(&server)
			.await;

		let logs = CapturedLogs::default();
		let writer = logs.clone();
		let subscriber = tracing_subscriber::fmt()
			.with_max_level(tracing::Level::DEBUG)
			.with_ansi(false)
			.with_writer(move || writer.clone())
			.finish();
		let _guard = tracing::subscriber::set_default(subscriber);

		let command = Command::VerifyOtp {
			phone: "254711223344".to_string(),
			otp: "987654".to_string(),
		};
		run(&client, command, None).await.unwrap();

		let out = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
		assert!(out.contains("verify-otp"), "{out}");
		assert!(!out.contains("987654"), "{out}");
		assert!(!out.contains("254711223344"), "{out}");
	}
}
