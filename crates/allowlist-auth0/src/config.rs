// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Management API client configuration.

use std::time::Duration;

use allowlist_common_http::{RetryPolicy, DEFAULT_TIMEOUT};
use url::Url;

use crate::secret::SecretString;

/// Scopes the machine-to-machine application must be granted.
pub const DEFAULT_SCOPES: [&str; 2] = ["read:clients", "update:clients"];

/// Errors found while validating a [`ManagementConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A required value was empty.
	#[error("missing required value: {0}")]
	Missing(&'static str),

	/// A value was present but unusable.
	#[error("invalid configuration: {0}")]
	Invalid(String),
}

/// Settings for talking to one Auth0 tenant's Management API.
///
/// # Fields
///
/// - `domain`: tenant domain such as `my-tenant.eu.auth0.com`. A scheme or
///   trailing slash given by the caller is stripped.
/// - `client_id` / `client_secret`: credentials of a machine-to-machine
///   application authorized for the Management API.
/// - `telemetry`: send the `Auth0-Client` header identifying this tool.
/// - `base_url`: overrides `https://{domain}` for requests. The token
///   audience always stays domain based.
#[derive(Debug, Clone)]
pub struct ManagementConfig {
	pub domain: String,
	pub client_id: String,
	pub client_secret: SecretString,
	pub telemetry: bool,
	pub scopes: Vec<String>,
	pub base_url: Option<String>,
	pub timeout: Duration,
	pub retry: RetryPolicy,
}

impl ManagementConfig {
	pub fn new(
		domain: impl AsRef<str>,
		client_id: impl Into<String>,
		client_secret: SecretString,
	) -> Self {
		Self {
			domain: normalize_domain(domain.as_ref()),
			client_id: client_id.into(),
			client_secret,
			telemetry: true,
			scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
			base_url: None,
			timeout: DEFAULT_TIMEOUT,
			retry: RetryPolicy::default(),
		}
	}

	pub fn with_telemetry(mut self, telemetry: bool) -> Self {
		self.telemetry = telemetry;
		self
	}

	/// Sends requests somewhere other than the tenant domain (useful for
	/// testing).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;
		self
	}

	/// Root that endpoint paths are appended to, without trailing slash.
	pub fn base_url(&self) -> String {
		match &self.base_url {
			Some(url) => url.trim_end_matches('/').to_string(),
			None => format!("https://{}", self.domain),
		}
	}

	/// Token audience identifying the Management API of this tenant.
	pub fn audience(&self) -> String {
		format!("https://{}/api/v2/", self.domain)
	}

	pub fn scope_string(&self) -> String {
		self.scopes.join(" ")
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.domain.is_empty() {
			return Err(ConfigError::Missing("domain"));
		}
		if self.client_id.is_empty() {
			return Err(ConfigError::Missing("client_id"));
		}
		if self.client_secret.is_empty() {
			return Err(ConfigError::Missing("client_secret"));
		}
		let base = self.base_url();
		let parsed = Url::parse(&base)
			.map_err(|e| ConfigError::Invalid(format!("base URL {base} is not valid: {e}")))?;
		if parsed.cannot_be_a_base() {
			return Err(ConfigError::Invalid(format!(
				"base URL {base} cannot have paths appended"
			)));
		}
		Ok(())
	}
}

/// Strips surrounding whitespace, an `http(s)://` scheme and trailing
/// slashes from a tenant domain.
pub fn normalize_domain(raw: &str) -> String {
	let trimmed = raw.trim();
	let without_scheme = trimmed
		.strip_prefix("https://")
		.or_else(|| trimmed.strip_prefix("http://"))
		.unwrap_or(trimmed);
	without_scheme.trim_end_matches('/').to_string()
}
