// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP client for the Weito lending API.
//!
//! A thin wrapper around [`reqwest`]: each method on [`WeitoClient`] maps to
//! exactly one backend endpoint and returns the raw [`reqwest::Response`].
//! Bodies are not parsed; use the models in [`types`] with
//! `response.json::<T>()` when a typed view is wanted.
//!
//! # Example
//!
//! ```ignore
//! use weito_client::{types::OtpVerifyResponse, SecretString};
//!
//! let client = weito_client::shared()?;
//! client.request_otp("254700000000").await?;
//!
//! let verified: OtpVerifyResponse = client
//!     .verify_otp("254700000000", "123456")
//!     .await?
//!     .json()
//!     .await?;
//!
//! let summary = client
//!     .get_loan_summary(Some(&verified.access_token))
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{paths, shared, WeitoClient};
pub use config::{resolve_base_url, ClientConfig, DEFAULT_BASE_URL};
pub use error::{Result, WeitoError};
pub use weito_common_secret::SecretString;
