// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Auth0 Management API v2 client for application allowlists.
//!
//! [`ManagementClient`] authenticates with the client-credentials grant,
//! reads a client's callbacks, logout URLs, allowed origins and web origins,
//! and sends partial updates. It implements
//! [`allowlist_core::ManagementApi`] so it can drive a
//! [`allowlist_core::ClientUpdater`].
//!
//! # Example
//!
//! ```ignore
//! use allowlist_auth0::{ManagementClient, ManagementConfig, SecretString};
//! use allowlist_core::{ClientUpdater, ListField, UpdateRequest};
//!
//! let config = ManagementConfig::new("my-tenant.auth0.com", "m2m-id", SecretString::new(secret));
//! let updater = ClientUpdater::new(ManagementClient::new(config)?);
//! let request = UpdateRequest::new().with(ListField::CallbackUrl, "https://pr-42.example.com/callback");
//! let outcome = updater.add("app-client-id", &request).await?;
//! println!("{}", outcome.summary());
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod secret;
pub mod telemetry;
pub mod token;

pub use client::{ManagementClient, CLIENT_FIELDS};
pub use config::{normalize_domain, ConfigError, ManagementConfig, DEFAULT_SCOPES};
pub use error::ManagementError;
pub use secret::SecretString;
pub use token::TokenResponse;
