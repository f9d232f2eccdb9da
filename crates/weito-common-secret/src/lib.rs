// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret wrapper type for Weito.
//!
//! [`Secret<T>`] holds a sensitive value (bearer tokens, OTP-issued access
//! tokens) and makes it hard to leak by accident:
//!
//! - `Debug` and `Display` print [`REDACTED`] instead of the value
//! - serializing with serde writes [`REDACTED`]
//! - the value is zeroized when the wrapper is dropped
//!
//! The only way to read the value is [`Secret::expose`].

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroize;

/// Placeholder written wherever a secret would otherwise be rendered.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must not show up in logs or debug output.
pub struct Secret<T: Zeroize> {
	inner: T,
}

/// The common case: a secret string such as a bearer token.
pub type SecretString = Secret<String>;

impl<T: Zeroize> Secret<T> {
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Returns a reference to the wrapped value.
	///
	/// Call sites of this method are the places where the secret leaves the
	/// wrapper, e.g. when building an `Authorization` header.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// Returns true if the wrapped string is empty.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl<T: Zeroize> Drop for Secret<T> {
	fn drop(&mut self) {
		self.inner.zeroize();
	}
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
	fn clone(&self) -> Self {
		Self::new(self.inner.clone())
	}
}

impl<T: Zeroize + PartialEq> PartialEq for Secret<T> {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T: Zeroize + Eq> Eq for Secret<T> {}

impl<T: Zeroize> fmt::Debug for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T: Zeroize> fmt::Display for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

impl FromStr for SecretString {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s))
	}
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Secret<T>
where
	T: Zeroize + serde::Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		T::deserialize(deserializer).map(Secret::new)
	}
}

#[cfg(feature = "serde")]
impl<T: Zeroize> serde::Serialize for Secret<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}
