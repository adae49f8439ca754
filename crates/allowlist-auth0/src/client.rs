// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Auth0 Management API v2 client.

use allowlist_common_http::retry;
use allowlist_core::{ClientRecord, ManagementApi, PatchSet};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, error, instrument, trace};
use url::Url;

use crate::config::{ConfigError, ManagementConfig};
use crate::error::ManagementError;
use crate::secret::SecretString;
use crate::telemetry;
use crate::token::{TokenRequest, TokenResponse, TOKEN_PATH};

/// Attributes requested when reading a client.
pub const CLIENT_FIELDS: &str = "client_id,callbacks,allowed_logout_urls,allowed_origins,web_origins";

/// Reads and patches applications through the Management API.
///
/// The access token is requested lazily on first use and reused for every
/// later call on the same client.
#[derive(Debug)]
pub struct ManagementClient {
	config: ManagementConfig,
	http_client: Client,
	base_url: Url,
	telemetry: Option<String>,
	token: OnceCell<SecretString>,
}

impl ManagementClient {
	pub fn new(config: ManagementConfig) -> Result<Self, ManagementError> {
		config.validate()?;

		let base_url = Url::parse(&config.base_url())
			.map_err(|e| ConfigError::Invalid(format!("base URL is not valid: {e}")))?;
		let http_client = allowlist_common_http::new_client_with_timeout(config.timeout)
			.map_err(ManagementError::Client)?;
		let telemetry = config.telemetry.then(telemetry::header_value);

		Ok(Self {
			config,
			http_client,
			base_url,
			telemetry,
			token: OnceCell::new(),
		})
	}

	/// Reads the four allowlists of `client_id`.
	#[instrument(skip(self))]
	pub async fn fetch_client(&self, client_id: &str) -> Result<ClientRecord, ManagementError> {
		let token = self.access_token().await?;
		let url = self.client_url(client_id)?;
		retry(&self.config.retry, || self.fetch_client_once(&url, token)).await
	}

	/// Sends a partial update containing only the lists in `patch`.
	#[instrument(skip(self, patch), fields(lists = patch.len()))]
	pub async fn patch_client(
		&self,
		client_id: &str,
		patch: &PatchSet,
	) -> Result<ClientRecord, ManagementError> {
		let token = self.access_token().await?;
		let url = self.client_url(client_id)?;
		retry(&self.config.retry, || self.patch_client_once(&url, token, patch)).await
	}

	async fn fetch_client_once(
		&self,
		url: &Url,
		token: &SecretString,
	) -> Result<ClientRecord, ManagementError> {
		debug!(url = %url, "fetching client");
		let request = self
			.authorized(self.http_client.get(url.clone()), token)
			.query(&[("fields", CLIENT_FIELDS), ("include_fields", "true")]);
		let response = request.send().await.map_err(transport_error)?;
		read_json(response).await
	}

	async fn patch_client_once(
		&self,
		url: &Url,
		token: &SecretString,
		patch: &PatchSet,
	) -> Result<ClientRecord, ManagementError> {
		debug!(url = %url, "patching client");
		let request = self
			.authorized(self.http_client.patch(url.clone()), token)
			.json(patch);
		let response = request.send().await.map_err(transport_error)?;
		read_json(response).await
	}

	async fn access_token(&self) -> Result<&SecretString, ManagementError> {
		self
			.token
			.get_or_try_init(|| async { retry(&self.config.retry, || self.request_token()).await })
			.await
	}

	async fn request_token(&self) -> Result<SecretString, ManagementError> {
		let url = self.endpoint(&TOKEN_PATH)?;
		let audience = self.config.audience();
		let scope = self.config.scope_string();
		let body = TokenRequest::client_credentials(
			&self.config.client_id,
			self.config.client_secret.expose(),
			&audience,
			&scope,
		);

		debug!(url = %url, audience = %audience, "requesting management API token");
		let mut request = self.http_client.post(url).json(&body);
		if let Some(value) = &self.telemetry {
			request = request.header(telemetry::HEADER, value);
		}
		let response = request.send().await.map_err(transport_error)?;
		let token: TokenResponse = read_json(response).await?;
		trace!(
			token_type = ?token.token_type,
			expires_in = ?token.expires_in,
			"received management API token"
		);
		Ok(token.access_token)
	}

	fn authorized(
		&self,
		request: reqwest::RequestBuilder,
		token: &SecretString,
	) -> reqwest::RequestBuilder {
		let request = request.bearer_auth(token.expose());
		match &self.telemetry {
			Some(value) => request.header(telemetry::HEADER, value),
			None => request,
		}
	}

	fn client_url(&self, client_id: &str) -> Result<Url, ManagementError> {
		self.endpoint(&["api", "v2", "clients", client_id])
	}

	/// Appends path segments to the base URL, percent-encoding each one.
	fn endpoint(&self, segments: &[&str]) -> Result<Url, ManagementError> {
		let mut url = self.base_url.clone();
		url
			.path_segments_mut()
			.map_err(|_| ConfigError::Invalid(format!("base URL {} cannot have paths appended", self.base_url)))?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}
}

#[async_trait]
impl ManagementApi for ManagementClient {
	type Error = ManagementError;

	async fn get_client(&self, client_id: &str) -> Result<ClientRecord, ManagementError> {
		self.fetch_client(client_id).await
	}

	async fn update_client(
		&self,
		client_id: &str,
		patch: &PatchSet,
	) -> Result<ClientRecord, ManagementError> {
		self.patch_client(client_id, patch).await
	}
}

fn transport_error(err: reqwest::Error) -> ManagementError {
	error!(error = %err, "request to Auth0 failed");
	ManagementError::from_transport(err)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ManagementError> {
	let status = response.status();
	let headers = response.headers().clone();
	let body = response.text().await.map_err(transport_error)?;

	if !status.is_success() {
		let err = ManagementError::from_response(status, &headers, &body);
		error!(status = status.as_u16(), error = %err, "Auth0 returned an error");
		return Err(err);
	}

	serde_json::from_str(&body).map_err(|e| {
		error!(error = %e, "failed to parse Auth0 response");
		ManagementError::InvalidResponse(format!("JSON parse error: {e}"))
	})
}
