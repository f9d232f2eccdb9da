// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Weito.
//!
//! This crate provides a pre-configured HTTP client with a consistent
//! User-Agent, a default JSON content type and the standard request timeout.

mod client;

pub use client::{
	builder, default_headers, new_client_with_timeout, user_agent, DEFAULT_TIMEOUT,
};
