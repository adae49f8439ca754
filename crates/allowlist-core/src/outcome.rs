// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use crate::model::ListField;
use crate::patch::PatchSet;

/// Which allowlists were changed on the remote client.
///
/// All-false means no write was issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
	pub callback_url: bool,
	pub logout_url: bool,
	pub origin: bool,
	pub web_origin: bool,
}

impl UpdateOutcome {
	/// Marks exactly the fields present in `patch`, whatever their new
	/// contents (an emptied list still counts as changed).
	pub fn from_patch(patch: &PatchSet) -> Self {
		Self {
			callback_url: patch.contains(ListField::CallbackUrl),
			logout_url: patch.contains(ListField::LogoutUrl),
			origin: patch.contains(ListField::Origin),
			web_origin: patch.contains(ListField::WebOrigin),
		}
	}

	pub fn changed(&self, field: ListField) -> bool {
		match field {
			ListField::CallbackUrl => self.callback_url,
			ListField::LogoutUrl => self.logout_url,
			ListField::Origin => self.origin,
			ListField::WebOrigin => self.web_origin,
		}
	}

	pub fn changed_fields(&self) -> Vec<ListField> {
		ListField::ALL
			.into_iter()
			.filter(|field| self.changed(*field))
			.collect()
	}

	pub fn is_noop(&self) -> bool {
		self.changed_fields().is_empty()
	}

	/// Status line for the invoking pipeline: `Nothing to do`, or `Updated`
	/// followed by the changed field names.
	pub fn summary(&self) -> String {
		summarize("Updated", &self.changed_fields())
	}
}

/// Formats `<verb> a, b, c`, or `Nothing to do` when `fields` is empty.
pub fn summarize(verb: &str, fields: &[ListField]) -> String {
	if fields.is_empty() {
		return "Nothing to do".to_string();
	}
	let names: Vec<&str> = fields.iter().map(|field| field.name()).collect();
	format!("{verb} {}", names.join(", "))
}
