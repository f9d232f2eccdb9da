// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use weito_common_secret::SecretString;

/// Weito lending API client
#[derive(Parser, Debug)]
#[command(name = "weito", version)]
pub struct Args {
	/// API base URL (skips WEITO_BUILD_API_BASE_URL / WEITO_API_BASE_URL resolution)
	#[arg(long, global = true)]
	pub base_url: Option<String>,

	/// Bearer token for authenticated endpoints
	#[arg(long, env = "WEITO_TOKEN", global = true, hide_env_values = true)]
	pub token: Option<SecretString>,

	/// Request timeout in seconds
	#[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
	pub timeout_secs: Option<u64>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Check that the backend is up
	Health,

	/// Send a one-time password to a phone number
	RequestOtp {
		#[arg(long)]
		phone: String,
	},

	/// Exchange a one-time password for an access token
	VerifyOtp {
		#[arg(long)]
		phone: String,
		#[arg(long)]
		otp: String,
	},

	/// Apply for a loan (requires --token)
	ApplyLoan {
		/// Decimal amount, e.g. 2500.00
		#[arg(long)]
		amount: String,
		/// Repayment date, YYYY-MM-DD
		#[arg(long)]
		due_date: NaiveDate,
	},

	/// Show the client's loans (requires --token)
	LoanSummary,

	/// Show the client's payments (requires --token)
	Payments,

	/// Start an M-Pesa STK push for a loan repayment
	StkPush {
		#[arg(long)]
		loan_id: i64,
		#[arg(long)]
		phone: String,
		#[arg(long)]
		amount: String,
	},
}

impl Command {
	/// Subcommand name, safe to log (no phone numbers or codes).
	pub fn name(&self) -> &'static str {
		match self {
			Command::Health => "health",
			Command::RequestOtp { .. } => "request-otp",
			Command::VerifyOtp { .. } => "verify-otp",
			Command::ApplyLoan { .. } => "apply-loan",
			Command::LoanSummary => "loan-summary",
			Command::Payments => "payments",
			Command::StkPush { .. } => "stk-push",
		}
	}

	pub fn requires_token(&self) -> bool {
		matches!(
			self,
			Command::ApplyLoan { .. } | Command::LoanSummary | Command::Payments
		)
	}
}
