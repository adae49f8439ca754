// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The `Auth0-Client` telemetry header.

use allowlist_common_http::PRODUCT;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;

/// Header Auth0 reads SDK identification from.
pub const HEADER: &str = "Auth0-Client";

#[derive(Debug, Serialize)]
struct ClientInfo<'a> {
	name: &'a str,
	version: &'a str,
	env: Env<'a>,
}

#[derive(Debug, Serialize)]
struct Env<'a> {
	os: &'a str,
	arch: &'a str,
}

/// Base64url (unpadded) JSON naming this tool, its version and platform.
pub fn header_value() -> String {
	let info = ClientInfo {
		name: PRODUCT,
		version: env!("CARGO_PKG_VERSION"),
		env: Env {
			os: std::env::consts::OS,
			arch: std::env::consts::ARCH,
		},
	};
	// Serializing a struct of string fields cannot fail.
	let json = serde_json::to_vec(&info).unwrap_or_default();
	URL_SAFE_NO_PAD.encode(json)
}
