// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Weito API client.

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Errors returned by [`crate::WeitoClient`].
///
/// Transport failures and timeouts are reported by `reqwest` and handed
/// through unchanged in [`WeitoError::Http`]. A non-2xx answer keeps the whole
/// [`Response`] so the backend's body (e.g. `{"detail": "Invalid OTP"}`) can
/// still be read.
#[derive(Debug, Error)]
pub enum WeitoError {
	#[error(transparent)]
	Http(#[from] reqwest::Error),

	/// The backend answered with a non-2xx status.
	#[error("HTTP status {status} for url ({})", .response.url())]
	Status {
		status: StatusCode,
		response: Response,
	},

	/// The configured base URL is not an absolute URL.
	#[error("invalid base URL {url:?}: {source}")]
	InvalidBaseUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},
}

impl WeitoError {
	/// HTTP status of a non-2xx response, if that is what failed.
	pub fn status(&self) -> Option<u16> {
		match self {
			WeitoError::Status { status, .. } => Some(status.as_u16()),
			WeitoError::Http(e) => e.status().map(|s| s.as_u16()),
			WeitoError::InvalidBaseUrl { .. } => None,
		}
	}

	/// Takes the non-2xx response out of the error, if there is one.
	pub fn into_response(self) -> Option<Response> {
		match self {
			WeitoError::Status { response, .. } => Some(response),
			_ => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, WeitoError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_base_url_has_no_status() {
		let err = WeitoError::InvalidBaseUrl {
			url: "nope".to_string(),
			source: url::ParseError::RelativeUrlWithoutBase,
		};
		assert_eq!(err.status(), None);
		assert!(err.to_string().contains("\"nope\""));
		assert!(err.into_response().is_none());
	}

	#[test]
	fn status_error_keeps_response() {
		let response: Response = http::Response::builder()
			.status(422)
			.body("{\"detail\":\"Amount exceeds your limit\"}")
			.unwrap()
			.into();
		let err = WeitoError::Status {
			status: response.status(),
			response,
		};

		assert_eq!(err.status(), Some(422));
		assert!(err.to_string().contains("422"));
		assert_eq!(err.into_response().unwrap().status().as_u16(), 422);
	}
}
