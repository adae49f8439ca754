// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Allowlist fields, the fetched client snapshot, and the caller's request.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One of the four allowlists registered on an application.
///
/// Ordering follows declaration order, which is also the order fields are
/// reported and serialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListField {
	CallbackUrl,
	LogoutUrl,
	Origin,
	WebOrigin,
}

impl ListField {
	pub const ALL: [ListField; 4] = [
		ListField::CallbackUrl,
		ListField::LogoutUrl,
		ListField::Origin,
		ListField::WebOrigin,
	];

	/// Name used when reporting which fields changed.
	pub fn name(self) -> &'static str {
		match self {
			ListField::CallbackUrl => "callbackUrl",
			ListField::LogoutUrl => "logoutUrl",
			ListField::Origin => "origin",
			ListField::WebOrigin => "webOrigin",
		}
	}

	/// Attribute name on the remote client resource.
	pub fn attribute(self) -> &'static str {
		match self {
			ListField::CallbackUrl => "callbacks",
			ListField::LogoutUrl => "allowed_logout_urls",
			ListField::Origin => "allowed_origins",
			ListField::WebOrigin => "web_origins",
		}
	}
}

impl fmt::Display for ListField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Snapshot of a client's allowlists as returned by the management API.
///
/// Lists missing from the response (or sent as `null`) are normalized to
/// empty vectors, so nothing downstream deals with optional lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
	pub client_id: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub callbacks: Vec<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub allowed_logout_urls: Vec<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub allowed_origins: Vec<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub web_origins: Vec<String>,
}

impl ClientRecord {
	pub fn new(client_id: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			..Default::default()
		}
	}

	/// Replaces the contents of one list.
	pub fn with_list<I, S>(mut self, field: ListField, values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		*self.list_mut(field) = values.into_iter().map(Into::into).collect();
		self
	}

	pub fn list(&self, field: ListField) -> &[String] {
		match field {
			ListField::CallbackUrl => &self.callbacks,
			ListField::LogoutUrl => &self.allowed_logout_urls,
			ListField::Origin => &self.allowed_origins,
			ListField::WebOrigin => &self.web_origins,
		}
	}

	fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
		match field {
			ListField::CallbackUrl => &mut self.callbacks,
			ListField::LogoutUrl => &mut self.allowed_logout_urls,
			ListField::Origin => &mut self.allowed_origins,
			ListField::WebOrigin => &mut self.web_origins,
		}
	}
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Candidate values to add to or remove from each allowlist.
///
/// A `None` field leaves the corresponding list untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
	pub callback_url: Option<String>,
	pub logout_url: Option<String>,
	pub origin: Option<String>,
	pub web_origin: Option<String>,
}

impl UpdateRequest {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, field: ListField, value: impl Into<String>) -> Self {
		let value = Some(value.into());
		match field {
			ListField::CallbackUrl => self.callback_url = value,
			ListField::LogoutUrl => self.logout_url = value,
			ListField::Origin => self.origin = value,
			ListField::WebOrigin => self.web_origin = value,
		}
		self
	}

	pub fn candidate(&self, field: ListField) -> Option<&str> {
		match field {
			ListField::CallbackUrl => self.callback_url.as_deref(),
			ListField::LogoutUrl => self.logout_url.as_deref(),
			ListField::Origin => self.origin.as_deref(),
			ListField::WebOrigin => self.web_origin.as_deref(),
		}
	}

	/// True when no field carries a candidate.
	pub fn is_empty(&self) -> bool {
		ListField::ALL
			.iter()
			.all(|field| self.candidate(*field).is_none())
	}
}
