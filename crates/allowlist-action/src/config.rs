// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turns raw action inputs into a validated [`ActionConfig`].

use allowlist_auth0::{ManagementConfig, SecretString};
use allowlist_core::{ListField, Operation, ParseOperationError, UpdateRequest};

use crate::args::Args;

/// Input problems found before any remote call.
#[derive(Debug, thiserror::Error)]
pub enum ActionConfigError {
	#[error("Input required and not supplied: {0}")]
	MissingInput(&'static str),

	#[error(transparent)]
	InvalidOperation(#[from] ParseOperationError),

	#[error("Input does not meet YAML 1.2 \"Core Schema\" specification: {0}\nSupport boolean input list: `true | True | TRUE | false | False | FALSE`")]
	InvalidBoolean(&'static str),
}

/// Everything one run needs, resolved once at startup.
#[derive(Debug)]
pub struct ActionConfig {
	pub management: ManagementConfig,
	pub operation: Operation,
	pub client_id: String,
	pub request: UpdateRequest,
	pub dry_run: bool,
}

impl ActionConfig {
	/// Validates inputs in the order the action declares them. Values are
	/// trimmed and empty strings count as not supplied.
	pub fn from_args(args: Args) -> Result<Self, ActionConfigError> {
		let domain = required(args.domain, "domain")?;
		let api_client_id = required(args.api_client_id, "api_client_id")?;
		let api_client_secret = secret_input(args.api_client_secret.as_ref())
			.ok_or(ActionConfigError::MissingInput("api_client_secret"))?;
		let operation: Operation = required(args.operation, "operation")?.parse()?;
		let client_id = required(args.client_id, "client_id")?;

		let mut request = UpdateRequest::new();
		let candidates = [
			(ListField::CallbackUrl, args.callback_url),
			(ListField::LogoutUrl, args.logout_url),
			(ListField::WebOrigin, args.web_origin),
			(ListField::Origin, args.origin),
		];
		for (field, value) in candidates {
			if let Some(value) = input(value) {
				request = request.with(field, value);
			}
		}

		let telemetry = boolean(args.telemetry, "telemetry", true)?;
		let dry_run = boolean(args.dry_run, "dry_run", false)?;

		let management = ManagementConfig::new(domain, api_client_id, api_client_secret)
			.with_telemetry(telemetry);

		Ok(Self {
			management,
			operation,
			client_id,
			request,
			dry_run,
		})
	}
}

fn input(value: Option<String>) -> Option<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}

/// Trims a secret without copying it into an unprotected `String`.
fn secret_input(value: Option<&SecretString>) -> Option<SecretString> {
	value
		.map(|secret| secret.expose().trim())
		.filter(|trimmed| !trimmed.is_empty())
		.map(SecretString::new)
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ActionConfigError> {
	input(value).ok_or(ActionConfigError::MissingInput(name))
}

/// Parses a YAML 1.2 core schema boolean, falling back to `default` when
/// the input is not supplied.
fn boolean(
	value: Option<String>,
	name: &'static str,
	default: bool,
) -> Result<bool, ActionConfigError> {
	match input(value).as_deref() {
		None => Ok(default),
		Some("true" | "True" | "TRUE") => Ok(true),
		Some("false" | "False" | "FALSE") => Ok(false),
		Some(_) => Err(ActionConfigError::InvalidBoolean(name)),
	}
}
