// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Fetch, decide, write: the single read-modify-write round against the
//! management API.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::model::{ClientRecord, UpdateRequest};
use crate::outcome::UpdateOutcome;
use crate::patch::{Operation, PatchSet};

/// Management API operations the updater needs.
///
/// Authentication, transport, retries and rate limiting belong to the
/// implementation.
#[async_trait]
pub trait ManagementApi: Send + Sync {
	type Error: std::error::Error + Send + Sync + 'static;

	/// Read the current configuration of a client.
	async fn get_client(&self, client_id: &str) -> Result<ClientRecord, Self::Error>;

	/// Apply a partial update. Attributes not in `patch` must be left alone.
	async fn update_client(
		&self,
		client_id: &str,
		patch: &PatchSet,
	) -> Result<ClientRecord, Self::Error>;
}

/// Failure of one update round, tagged with the step that failed.
///
/// Display is the underlying error's message, unchanged.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError<E>
where
	E: std::error::Error + 'static,
{
	/// Reading the client failed; nothing was written.
	#[error(transparent)]
	Fetch(E),

	/// The write failed after a successful read. Remote state is whatever
	/// the API left it in.
	#[error(transparent)]
	Write(E),
}

impl<E> UpdateError<E>
where
	E: std::error::Error + 'static,
{
	pub fn stage(&self) -> &'static str {
		match self {
			UpdateError::Fetch(_) => "fetch",
			UpdateError::Write(_) => "write",
		}
	}

	pub fn into_inner(self) -> E {
		match self {
			UpdateError::Fetch(e) | UpdateError::Write(e) => e,
		}
	}
}

/// Adds or removes allowlist entries on one client.
#[derive(Debug, Clone)]
pub struct ClientUpdater<M> {
	api: M,
}

impl<M: ManagementApi> ClientUpdater<M> {
	pub fn new(api: M) -> Self {
		Self { api }
	}

	pub fn api(&self) -> &M {
		&self.api
	}

	/// Fetches the client once and computes the patch, without writing.
	#[instrument(skip(self, request))]
	pub async fn plan(
		&self,
		operation: Operation,
		client_id: &str,
		request: &UpdateRequest,
	) -> Result<PatchSet, UpdateError<M::Error>> {
		let current = self
			.api
			.get_client(client_id)
			.await
			.map_err(UpdateError::Fetch)?;
		debug!(
			callbacks = current.callbacks.len(),
			allowed_logout_urls = current.allowed_logout_urls.len(),
			allowed_origins = current.allowed_origins.len(),
			web_origins = current.web_origins.len(),
			"fetched client allowlists"
		);

		let patch = operation.plan(&current, request);
		debug!(changed = patch.len(), "computed allowlist patch");
		Ok(patch)
	}

	/// Runs one update round. Writes at most once, and only the lists that
	/// change.
	#[instrument(skip(self, request))]
	pub async fn apply(
		&self,
		operation: Operation,
		client_id: &str,
		request: &UpdateRequest,
	) -> Result<UpdateOutcome, UpdateError<M::Error>> {
		let patch = self.plan(operation, client_id, request).await?;
		if patch.is_empty() {
			info!("allowlists already in the requested state");
			return Ok(UpdateOutcome::default());
		}

		self
			.api
			.update_client(client_id, &patch)
			.await
			.map_err(UpdateError::Write)?;

		let outcome = UpdateOutcome::from_patch(&patch);
		info!(changed = ?outcome.changed_fields(), "client allowlists updated");
		Ok(outcome)
	}

	pub async fn add(
		&self,
		client_id: &str,
		request: &UpdateRequest,
	) -> Result<UpdateOutcome, UpdateError<M::Error>> {
		self.apply(Operation::Add, client_id, request).await
	}

	pub async fn remove(
		&self,
		client_id: &str,
		request: &UpdateRequest,
	) -> Result<UpdateOutcome, UpdateError<M::Error>> {
		self.apply(Operation::Remove, client_id, request).await
	}
}
