// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Idempotent allowlist patch calculation.
//!
//! Both operations look at each of the four lists independently and only
//! emit a field when its contents actually change. Values are compared with
//! exact string equality; no trimming, case folding or URL canonicalization
//! is applied.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::{ClientRecord, ListField, UpdateRequest};

/// New contents for the lists that change. Fields that stay the same are
/// absent, not emptied.
///
/// Serializes to the partial-update body, keyed by remote attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSet {
	lists: BTreeMap<ListField, Vec<String>>,
}

impl PatchSet {
	pub fn is_empty(&self) -> bool {
		self.lists.is_empty()
	}

	pub fn len(&self) -> usize {
		self.lists.len()
	}

	pub fn contains(&self, field: ListField) -> bool {
		self.lists.contains_key(&field)
	}

	pub fn get(&self, field: ListField) -> Option<&[String]> {
		self.lists.get(&field).map(Vec::as_slice)
	}

	/// Changed fields in report order.
	pub fn fields(&self) -> impl Iterator<Item = ListField> + '_ {
		self.lists.keys().copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (ListField, &[String])> + '_ {
		self.lists.iter().map(|(field, list)| (*field, list.as_slice()))
	}
}

impl Serialize for PatchSet {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.lists.len()))?;
		for (field, list) in &self.lists {
			map.serialize_entry(field.attribute(), list)?;
		}
		map.end()
	}
}

/// Which way to move the candidate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	Add,
	Remove,
}

impl Operation {
	pub fn as_str(self) -> &'static str {
		match self {
			Operation::Add => "add",
			Operation::Remove => "remove",
		}
	}

	/// Computes the patch this operation needs against `current`.
	pub fn plan(self, current: &ClientRecord, request: &UpdateRequest) -> PatchSet {
		match self {
			Operation::Add => add(current, request),
			Operation::Remove => remove(current, request),
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The operation name was neither `add` nor `remove`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("operation should be \"add\" or \"remove\"")]
pub struct ParseOperationError {
	pub value: String,
}

impl FromStr for Operation {
	type Err = ParseOperationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"add" => Ok(Operation::Add),
			"remove" => Ok(Operation::Remove),
			other => Err(ParseOperationError {
				value: other.to_string(),
			}),
		}
	}
}

/// Appends each candidate to its list unless it is already a member.
pub fn add(current: &ClientRecord, request: &UpdateRequest) -> PatchSet {
	build(current, request, appended)
}

/// Strips every occurrence of each candidate from its list.
pub fn remove(current: &ClientRecord, request: &UpdateRequest) -> PatchSet {
	build(current, request, without)
}

fn build(
	current: &ClientRecord,
	request: &UpdateRequest,
	rule: fn(&[String], &str) -> Option<Vec<String>>,
) -> PatchSet {
	let mut patch = PatchSet::default();
	for field in ListField::ALL {
		let Some(candidate) = request.candidate(field) else {
			continue;
		};
		if let Some(next) = rule(current.list(field), candidate) {
			patch.lists.insert(field, next);
		}
	}
	patch
}

fn appended(list: &[String], value: &str) -> Option<Vec<String>> {
	if list.iter().any(|entry| entry == value) {
		return None;
	}
	let mut next = Vec::with_capacity(list.len() + 1);
	next.extend_from_slice(list);
	next.push(value.to_string());
	Some(next)
}

fn without(list: &[String], value: &str) -> Option<Vec<String>> {
	let next: Vec<String> = list
		.iter()
		.filter(|entry| entry.as_str() != value)
		.cloned()
		.collect();
	(next.len() != list.len()).then_some(next)
}
