// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request and response models for the Weito API.
//!
//! Endpoint methods accept any `Serialize` payload and never decode
//! responses, so these types are optional conveniences. They mirror what the
//! backend sends and are not validated locally.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use weito_common_secret::SecretString;

/// A decimal money amount, kept as the backend's textual representation.
///
/// The backend renders amounts as strings (`"1500.00"`) from serializers but
/// as JSON numbers when it returns raw model values, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Amount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Text(String),
			Number(serde_json::Number),
		}

		Ok(match Raw::deserialize(deserializer)? {
			Raw::Text(s) => Amount(s),
			Raw::Number(n) => Amount(n.to_string()),
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
	Active,
	Paid,
	Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
	Pending,
	Approved,
	Rejected,
}

// Request bodies

#[derive(Debug, Serialize)]
pub(crate) struct OtpRequest<'a> {
	pub phone_number: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct OtpVerifyRequest<'a> {
	pub phone_number: &'a str,
	pub otp: &'a str,
}

/// Body for `POST /client/loans/apply/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
	pub amount: Amount,
	pub due_date: NaiveDate,
}

/// Body for `POST /mpesa/stk-push/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StkPushRequest {
	pub loan_id: i64,
	pub phone: String,
	pub amount: Amount,
}

// Response bodies

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
	pub status: String,
	pub service: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpRequestResponse {
	pub detail: String,
	pub otp_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpVerifyResponse {
	pub access_token: SecretString,
	pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoanApplicationResponse {
	pub loan_id: i64,
	pub status: LoanStatus,
	pub approval_status: ApprovalStatus,
	pub amount: Amount,
	pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoanSummary {
	pub client: ClientProfile,
	pub loans: Vec<LoanRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientProfile {
	pub name: String,
	pub phone_number: String,
	pub credit_score: u16,
	pub max_loan_limit: Amount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoanRecord {
	pub id: i64,
	pub amount: Amount,
	pub status: LoanStatus,
	pub due_date: NaiveDate,
	pub created_at: DateTime<Utc>,
	pub balance: Amount,
	pub approval_status: ApprovalStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentHistory {
	pub results: Vec<PaymentRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRecord {
	pub id: i64,
	pub loan_id: i64,
	pub amount: Amount,
	pub mpesa_receipt: String,
	pub phone: String,
	pub paid_at: DateTime<Utc>,
}
