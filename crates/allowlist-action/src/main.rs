// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `auth0-allowlist`: the GitHub Action entry point.
//!
//! Reads action inputs, runs one add or remove round against the Auth0
//! Management API, and prints the status line (or an `::error::` command)
//! to stdout. Logs go to stderr.

mod args;
mod config;
mod workflow;

use std::io;
use std::process::ExitCode;

use allowlist_auth0::ManagementClient;
use allowlist_core::{
	summarize, ClientUpdater, ListField, ManagementApi, Operation, UpdateError, UpdateRequest,
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use args::Args;
use config::ActionConfig;

#[tokio::main]
async fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(io::stderr)
		.init();

	let args = Args::parse();
	let result = run(args).await;
	let mut stdout = io::stdout().lock();

	match result {
		Ok(message) => {
			if let Err(e) = workflow::info(&mut stdout, &message) {
				error!(error = %e, "failed to write status line");
				return ExitCode::FAILURE;
			}
			ExitCode::SUCCESS
		}
		Err(e) => {
			error!(error = %e, "allowlist update failed");
			// Nothing left to report to if stdout is gone.
			let _ = workflow::error(&mut stdout, &e.to_string());
			ExitCode::FAILURE
		}
	}
}

async fn run(args: Args) -> anyhow::Result<String> {
	let ActionConfig {
		management,
		operation,
		client_id,
		request,
		dry_run,
	} = ActionConfig::from_args(args)?;

	info!(
		domain = %management.domain,
		%operation,
		client_id = %client_id,
		telemetry = management.telemetry,
		dry_run,
		"starting allowlist update"
	);

	let updater = ClientUpdater::new(ManagementClient::new(management)?);
	let message = execute(&updater, operation, &client_id, &request, dry_run).await?;
	Ok(message)
}

/// Runs one update round and returns the status line. With `dry_run` the
/// client is read and the patch logged, but nothing is written.
async fn execute<M: ManagementApi>(
	updater: &ClientUpdater<M>,
	operation: Operation,
	client_id: &str,
	request: &UpdateRequest,
	dry_run: bool,
) -> Result<String, UpdateError<M::Error>> {
	if dry_run {
		let patch = updater.plan(operation, client_id, request).await?;
		for (field, values) in patch.iter() {
			info!(field = %field, ?values, "would replace list");
		}
		let fields: Vec<ListField> = patch.fields().collect();
		return Ok(summarize("Would update", &fields));
	}

	let outcome = updater.apply(operation, client_id, request).await?;
	Ok(outcome.summary())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Mutex;

	use allowlist_core::{ClientRecord, PatchSet};
	use async_trait::async_trait;

	const APP_ID: &str = "app";

	#[derive(Debug, thiserror::Error)]
	#[error("tenant unavailable")]
	struct TenantDown;

	/// Serves a fixed client and records every write.
	struct RecordingApi {
		current: Option<ClientRecord>,
		writes: Mutex<Vec<PatchSet>>,
	}

	impl RecordingApi {
		fn new(current: ClientRecord) -> Self {
			Self {
				current: Some(current),
				writes: Mutex::new(Vec::new()),
			}
		}

		fn down() -> Self {
			Self {
				current: None,
				writes: Mutex::new(Vec::new()),
			}
		}

		fn writes(&self) -> Vec<PatchSet> {
			self.writes.lock().unwrap().clone()
		}
	}

	#[async_trait]
	impl ManagementApi for RecordingApi {
		type Error = TenantDown;

		async fn get_client(&self, _client_id: &str) -> Result<ClientRecord, TenantDown> {
			self.current.clone().ok_or(TenantDown)
		}

		async fn update_client(
			&self,
			_client_id: &str,
			patch: &PatchSet,
		) -> Result<ClientRecord, TenantDown> {
			self.writes.lock().unwrap().push(patch.clone());
			self.current.clone().ok_or(TenantDown)
		}
	}

	fn current() -> ClientRecord {
		ClientRecord::new(APP_ID)
			.with_list(ListField::CallbackUrl, ["https://example.com/callback"])
			.with_list(ListField::WebOrigin, ["https://web.example.com"])
	}

	fn preview_request() -> UpdateRequest {
		UpdateRequest::new()
			.with(ListField::CallbackUrl, "https://pr-9.example.com/callback")
			.with(ListField::Origin, "https://web.example.com")
			.with(ListField::WebOrigin, "https://pr-9.example.com")
	}

	#[tokio::test]
	async fn dry_run_reports_without_writing() {
		let updater = ClientUpdater::new(RecordingApi::new(current()));

		let message = execute(&updater, Operation::Add, APP_ID, &preview_request(), true)
			.await
			.unwrap();

		assert_eq!(message, "Would update callbackUrl, origin, webOrigin");
		assert!(updater.api().writes().is_empty());
	}

	#[tokio::test]
	async fn dry_run_with_nothing_to_change() {
		let updater = ClientUpdater::new(RecordingApi::new(current()));
		let request = UpdateRequest::new().with(ListField::WebOrigin, "https://web.example.com");

		let message = execute(&updater, Operation::Add, APP_ID, &request, true)
			.await
			.unwrap();

		assert_eq!(message, "Nothing to do");
		assert!(updater.api().writes().is_empty());
	}

	#[tokio::test]
	async fn live_run_writes_once_and_reports_updates() {
		let updater = ClientUpdater::new(RecordingApi::new(current()));

		let message = execute(&updater, Operation::Add, APP_ID, &preview_request(), false)
			.await
			.unwrap();

		assert_eq!(message, "Updated callbackUrl, origin, webOrigin");
		assert_eq!(updater.api().writes().len(), 1);
	}

	#[tokio::test]
	async fn live_remove_of_absent_value_is_a_noop() {
		let updater = ClientUpdater::new(RecordingApi::new(current()));
		let request = UpdateRequest::new().with(ListField::LogoutUrl, "https://pr-9.example.com");

		let message = execute(&updater, Operation::Remove, APP_ID, &request, false)
			.await
			.unwrap();

		assert_eq!(message, "Nothing to do");
		assert!(updater.api().writes().is_empty());
	}

	/// A failed read in dry-run mode surfaces the API's message unchanged.
	#[tokio::test]
	async fn dry_run_propagates_fetch_failure() {
		let updater = ClientUpdater::new(RecordingApi::down());

		let err = execute(&updater, Operation::Add, APP_ID, &preview_request(), true)
			.await
			.unwrap_err();

		assert_eq!(err.stage(), "fetch");
		assert_eq!(err.to_string(), "tenant unavailable");
	}
}
