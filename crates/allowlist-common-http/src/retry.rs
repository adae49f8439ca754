// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Retry with capped exponential backoff for transient HTTP failures.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::warn;

/// How many times to try a request and how long to wait in between.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
	/// Total attempts, including the first one. `1` disables retries.
	pub max_attempts: u32,
	pub base_delay: Duration,
	pub max_delay: Duration,
	/// Scale each delay by a random factor in `[0.5, 1.5)`.
	pub jitter: bool,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			base_delay: Duration::from_millis(250),
			max_delay: Duration::from_secs(5),
			jitter: true,
		}
	}
}

impl RetryPolicy {
	/// A policy that makes exactly one attempt.
	pub fn none() -> Self {
		Self {
			max_attempts: 1,
			..Self::default()
		}
	}

	/// Delay before retry number `retry` (zero-based).
	fn backoff(&self, retry: u32) -> Duration {
		let exponential = self.base_delay.as_secs_f64() * 2f64.powi(retry as i32);
		let capped = exponential.min(self.max_delay.as_secs_f64());
		let scaled = if self.jitter {
			capped * (0.5 + fastrand::f64())
		} else {
			capped
		};
		Duration::from_secs_f64(scaled)
	}
}

/// Classifies errors for [`retry`].
pub trait RetryableError {
	fn is_retryable(&self) -> bool;

	/// Server-provided wait, e.g. from a `Retry-After` header.
	fn retry_after(&self) -> Option<Duration> {
		None
	}
}

/// Statuses worth another attempt: throttling, timeouts and server errors.
pub fn is_retryable_status(status: StatusCode) -> bool {
	status == StatusCode::TOO_MANY_REQUESTS
		|| status == StatusCode::REQUEST_TIMEOUT
		|| status.is_server_error()
}

impl RetryableError for reqwest::Error {
	fn is_retryable(&self) -> bool {
		if self.is_timeout() || self.is_connect() {
			return true;
		}
		self.status().is_some_and(is_retryable_status)
	}
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the
/// policy's attempts are used up. The last error is returned.
pub async fn retry<F, Fut, T, E>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
	E: RetryableError + std::fmt::Display,
{
	let max_attempts = policy.max_attempts.max(1);
	let mut attempt = 0;

	loop {
		attempt += 1;
		let err = match op().await {
			Ok(value) => return Ok(value),
			Err(err) => err,
		};

		if !err.is_retryable() || attempt >= max_attempts {
			return Err(err);
		}

		let delay = err
			.retry_after()
			.map(|hint| hint.min(policy.max_delay))
			.unwrap_or_else(|| policy.backoff(attempt - 1));
		warn!(
			error = %err,
			attempt,
			max_attempts,
			delay_ms = delay.as_millis() as u64,
			"request failed, retrying"
		);
		tokio::time::sleep(delay).await;
	}
}
