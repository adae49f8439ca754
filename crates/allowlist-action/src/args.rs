// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::convert::Infallible;

use allowlist_auth0::SecretString;
use clap::Parser;

/// Add or remove a URL on an Auth0 application's callback, logout and origin
/// allowlists.
///
/// Every flag falls back to the `INPUT_*` variable GitHub Actions sets for
/// the matching action input.
#[derive(Parser, Debug, Default)]
#[command(name = "auth0-allowlist", version)]
pub struct Args {
	/// Auth0 tenant domain, e.g. my-tenant.eu.auth0.com
	#[arg(long, env = "INPUT_DOMAIN")]
	pub domain: Option<String>,

	/// Client id of a machine-to-machine application for the Management API
	#[arg(long, env = "INPUT_API_CLIENT_ID")]
	pub api_client_id: Option<String>,

	/// Client secret of the machine-to-machine application
	#[arg(long, env = "INPUT_API_CLIENT_SECRET", hide_env_values = true, value_parser = parse_secret)]
	pub api_client_secret: Option<SecretString>,

	/// `add` or `remove`
	#[arg(long, env = "INPUT_OPERATION")]
	pub operation: Option<String>,

	/// Client id of the application to update
	#[arg(long, env = "INPUT_CLIENT_ID")]
	pub client_id: Option<String>,

	/// Value for the Allowed Callback URLs list
	#[arg(long, env = "INPUT_CALLBACK_URL")]
	pub callback_url: Option<String>,

	/// Value for the Allowed Logout URLs list
	#[arg(long, env = "INPUT_LOGOUT_URL")]
	pub logout_url: Option<String>,

	/// Value for the Allowed Origins (CORS) list
	#[arg(long, env = "INPUT_ORIGIN")]
	pub origin: Option<String>,

	/// Value for the Allowed Web Origins list
	#[arg(long, env = "INPUT_WEB_ORIGIN")]
	pub web_origin: Option<String>,

	/// Send the Auth0-Client telemetry header (default true)
	#[arg(long, env = "INPUT_TELEMETRY")]
	pub telemetry: Option<String>,

	/// Read the application and report what would change without writing
	#[arg(long, env = "INPUT_DRY_RUN", num_args = 0..=1, default_missing_value = "true")]
	pub dry_run: Option<String>,
}

fn parse_secret(value: &str) -> Result<SecretString, Infallible> {
	Ok(SecretString::new(value))
}
