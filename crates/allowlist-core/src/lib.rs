// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Idempotent allowlist updates for identity-provider applications.
//!
//! This crate provides:
//! - [`patch`]: pure functions deciding which of the four allowlists
//!   (callbacks, logout URLs, allowed origins, web origins) change
//! - [`ClientUpdater`]: one fetch, at most one partial write, and a report of
//!   which lists changed
//! - [`ManagementApi`]: the seam to the remote management API

pub mod model;
pub mod outcome;
pub mod patch;
pub mod updater;

pub use model::{ClientRecord, ListField, UpdateRequest};
pub use outcome::{summarize, UpdateOutcome};
pub use patch::{Operation, ParseOperationError, PatchSet};
pub use updater::{ClientUpdater, ManagementApi, UpdateError};
