// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client-credentials grant against the tenant's `/oauth/token` endpoint.

use serde::{Deserialize, Serialize};

use crate::secret::SecretString;

pub(crate) const TOKEN_PATH: [&str; 2] = ["oauth", "token"];

/// Body of the client-credentials token request.
#[derive(Serialize)]
pub(crate) struct TokenRequest<'a> {
	pub grant_type: &'static str,
	pub client_id: &'a str,
	pub client_secret: &'a str,
	pub audience: &'a str,
	pub scope: &'a str,
}

impl<'a> TokenRequest<'a> {
	pub fn client_credentials(
		client_id: &'a str,
		client_secret: &'a str,
		audience: &'a str,
		scope: &'a str,
	) -> Self {
		Self {
			grant_type: "client_credentials",
			client_id,
			client_secret,
			audience,
			scope,
		}
	}
}

/// Successful token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
	pub access_token: SecretString,
	#[serde(default)]
	pub token_type: Option<String>,
	#[serde(default)]
	pub expires_in: Option<u64>,
	#[serde(default)]
	pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn request_serializes_client_credentials_grant() {
		let request = TokenRequest::client_credentials(
			"m2m",
			"secret",
			"https://t.auth0.com/api/v2/",
			"read:clients update:clients",
		);
		let json = serde_json::to_value(&request).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"grant_type": "client_credentials",
				"client_id": "m2m",
				"client_secret": "secret",
				"audience": "https://t.auth0.com/api/v2/",
				"scope": "read:clients update:clients",
			})
		);
	}

	#[test]
	fn response_tolerates_missing_optional_fields() {
		let response: TokenResponse =
			serde_json::from_str(r#"{"access_token":"eyJ.abc.def"}"#).unwrap();
		assert_eq!(response.access_token.expose(), "eyJ.abc.def");
		assert!(response.expires_in.is_none());

		let debug = format!("{response:?}");
		assert!(!debug.contains("eyJ.abc.def"));
	}

	#[test]
	fn response_reads_full_payload() {
		let response: TokenResponse = serde_json::from_str(
			r#"{"access_token":"tok","token_type":"Bearer","expires_in":86400,"scope":"read:clients update:clients"}"#,
		)
		.unwrap();
		assert_eq!(response.token_type.as_deref(), Some("Bearer"));
		assert_eq!(response.expires_in, Some(86400));
		assert_eq!(response.scope.as_deref(), Some("read:clients update:clients"));
	}
}
