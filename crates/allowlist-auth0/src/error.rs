// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Auth0 Management API client.

use std::time::Duration;

use allowlist_common_http::RetryableError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ConfigError;

/// Errors that can occur when talking to the Management API.
///
/// Variants built from an Auth0 error response display Auth0's own message
/// so it can be surfaced to the pipeline unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// The HTTP client could not be constructed.
	#[error("failed to build HTTP client: {0}")]
	Client(#[source] reqwest::Error),

	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[source] reqwest::Error),

	#[error("Request timed out")]
	Timeout,

	/// 401/403, from the token endpoint or the API (bad credentials, missing
	/// scopes).
	#[error("{message}")]
	Unauthorized { status: u16, message: String },

	/// The client id does not exist in the tenant.
	#[error("{message}")]
	NotFound { message: String },

	#[error("{message}")]
	RateLimited {
		message: String,
		retry_after: Option<Duration>,
	},

	/// Any other non-success status.
	#[error("{message}")]
	Api { status: u16, message: String },

	/// A success response whose body could not be decoded.
	#[error("Invalid response from Auth0: {0}")]
	InvalidResponse(String),
}

/// Error body shapes returned by Auth0.
///
/// The Management API sends `{statusCode, error, message, errorCode}`; the
/// token endpoint sends `{error, error_description}`.
#[derive(Debug, Default, Deserialize)]
struct Auth0ErrorBody {
	message: Option<String>,
	error_description: Option<String>,
	error: Option<String>,
}

impl ManagementError {
	/// Maps a non-success response to an error carrying Auth0's message.
	pub fn from_response(status: StatusCode, headers: &HeaderMap, body: &str) -> Self {
		let message = error_message(status, body);
		match status {
			StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ManagementError::Unauthorized {
				status: status.as_u16(),
				message,
			},
			StatusCode::NOT_FOUND => ManagementError::NotFound { message },
			StatusCode::TOO_MANY_REQUESTS => ManagementError::RateLimited {
				message,
				retry_after: parse_retry_after(headers),
			},
			_ => ManagementError::Api {
				status: status.as_u16(),
				message,
			},
		}
	}

	/// Wraps a transport error, separating timeouts out.
	pub fn from_transport(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			ManagementError::Timeout
		} else {
			ManagementError::Network(err)
		}
	}

	/// HTTP status for errors that came from a response.
	pub fn status(&self) -> Option<u16> {
		match self {
			ManagementError::Unauthorized { status, .. } | ManagementError::Api { status, .. } => {
				Some(*status)
			}
			ManagementError::NotFound { .. } => Some(404),
			ManagementError::RateLimited { .. } => Some(429),
			_ => None,
		}
	}
}

impl RetryableError for ManagementError {
	fn is_retryable(&self) -> bool {
		match self {
			ManagementError::Network(e) => e.is_retryable(),
			ManagementError::Timeout => true,
			ManagementError::RateLimited { .. } => true,
			ManagementError::Api { status, .. } => *status >= 500,
			ManagementError::Config(_)
			| ManagementError::Client(_)
			| ManagementError::Unauthorized { .. }
			| ManagementError::NotFound { .. }
			| ManagementError::InvalidResponse(_) => false,
		}
	}

	fn retry_after(&self) -> Option<Duration> {
		match self {
			ManagementError::RateLimited { retry_after, .. } => *retry_after,
			_ => None,
		}
	}
}

fn error_message(status: StatusCode, body: &str) -> String {
	let parsed: Auth0ErrorBody = serde_json::from_str(body).unwrap_or_default();
	parsed
		.message
		.or(parsed.error_description)
		.or(parsed.error)
		.filter(|m| !m.trim().is_empty())
		.unwrap_or_else(|| {
			let trimmed = body.trim();
			if trimmed.is_empty() {
				format!("Request failed with status code {}", status.as_u16())
			} else {
				format!("Request failed with status code {}: {trimmed}", status.as_u16())
			}
		})
}

/// Reads a `Retry-After` header given in whole seconds.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	headers
		.get(RETRY_AFTER)?
		.to_str()
		.ok()?
		.trim()
		.parse::<u64>()
		.ok()
		.map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
	use super::*;
	use reqwest::header::HeaderValue;

	#[test]
	fn management_api_message_is_used_verbatim() {
		let body = r#"{"statusCode":404,"error":"Not Found","message":"The client does not exist","errorCode":"inexistent_client"}"#;
		let err = ManagementError::from_response(StatusCode::NOT_FOUND, &HeaderMap::new(), body);

		assert!(matches!(err, ManagementError::NotFound { .. }));
		assert_eq!(err.to_string(), "The client does not exist");
		assert_eq!(err.status(), Some(404));
	}

	#[test]
	fn token_endpoint_description_is_used() {
		let body = r#"{"error":"access_denied","error_description":"Unauthorized"}"#;
		let err = ManagementError::from_response(StatusCode::UNAUTHORIZED, &HeaderMap::new(), body);

		assert!(matches!(
			err,
			ManagementError::Unauthorized { status: 401, .. }
		));
		assert_eq!(err.to_string(), "Unauthorized");
	}

	#[test]
	fn non_json_body_falls_back_to_status() {
		let err = ManagementError::from_response(StatusCode::BAD_GATEWAY, &HeaderMap::new(), "");
		assert_eq!(err.to_string(), "Request failed with status code 502");

		let err = ManagementError::from_response(
			StatusCode::BAD_GATEWAY,
			&HeaderMap::new(),
			"<html>bad gateway</html>",
		);
		assert_eq!(
			err.to_string(),
			"Request failed with status code 502: <html>bad gateway</html>"
		);
	}

	#[test]
	fn rate_limit_carries_retry_after() {
		let mut headers = HeaderMap::new();
		headers.insert(RETRY_AFTER, HeaderValue::from_static("2"));
		let body = r#"{"statusCode":429,"error":"Too Many Requests","message":"Global limit has been reached"}"#;

		let err = ManagementError::from_response(StatusCode::TOO_MANY_REQUESTS, &headers, body);

		assert!(err.is_retryable());
		assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
		assert_eq!(err.to_string(), "Global limit has been reached");
	}

	#[test]
	fn http_date_retry_after_is_ignored() {
		let mut headers = HeaderMap::new();
		headers.insert(
			RETRY_AFTER,
			HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
		);
		assert_eq!(parse_retry_after(&headers), None);
	}

	#[test]
	fn retryability_by_variant() {
		let api = |status: u16| ManagementError::Api {
			status,
			message: String::new(),
		};
		assert!(api(500).is_retryable());
		assert!(api(503).is_retryable());
		assert!(!api(400).is_retryable());
		assert!(ManagementError::Timeout.is_retryable());
		assert!(!ManagementError::NotFound {
			message: String::new()
		}
		.is_retryable());
		assert!(!ManagementError::Unauthorized {
			status: 403,
			message: String::new()
		}
		.is_retryable());
		assert!(!ManagementError::InvalidResponse(String::new()).is_retryable());
	}
}
