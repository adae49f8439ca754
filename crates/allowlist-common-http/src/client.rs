// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with a consistent User-Agent header.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Product token sent in the User-Agent and telemetry headers.
pub const PRODUCT: &str = "auth0-allowlist";

/// Default per-request timeout for management API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a client builder carrying the standard User-Agent header.
///
/// # Example
/// ```ignore
/// let client = allowlist_common_http::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds a client with the standard User-Agent and the given timeout.
pub fn new_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
	builder().timeout(timeout).build()
}

/// Returns the User-Agent string.
///
/// Format: `auth0-allowlist/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"{PRODUCT}/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
