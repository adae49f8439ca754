// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! GitHub Actions workflow command output.

use std::io::{self, Write};

/// Writes a plain log line.
pub fn info(out: &mut impl Write, message: &str) -> io::Result<()> {
	writeln!(out, "{message}")
}

/// Writes an `::error::` command, which fails the step's annotation.
pub fn error(out: &mut impl Write, message: &str) -> io::Result<()> {
	writeln!(out, "::error::{}", escape_data(message))
}

/// Escapes command data so a multi-line message stays one command.
pub fn escape_data(value: &str) -> String {
	value
		.replace('%', "%25")
		.replace('\r', "%0D")
		.replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn written(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
		let mut buf = Vec::new();
		f(&mut buf).unwrap();
		String::from_utf8(buf).unwrap()
	}

	#[test]
	fn info_is_written_verbatim() {
		let out = written(|buf| info(buf, "Updated callbackUrl, webOrigin"));
		assert_eq!(out, "Updated callbackUrl, webOrigin\n");
	}

	#[test]
	fn error_uses_workflow_command() {
		let out = written(|buf| error(buf, "The client does not exist"));
		assert_eq!(out, "::error::The client does not exist\n");
	}

	/// `%` is escaped first so existing escapes are not decoded by the
	/// runner.
	#[test]
	fn escapes_percent_and_newlines() {
		assert_eq!(escape_data("100%"), "100%25");
		assert_eq!(escape_data("a\r\nb"), "a%0D%0Ab");
		assert_eq!(escape_data("%0A"), "%250A");
	}

	#[test]
	fn multiline_error_stays_on_one_line() {
		let out = written(|buf| {
			error(
				buf,
				"Input does not meet YAML 1.2 \"Core Schema\" specification: telemetry\nSupport boolean input list",
			)
		});
		assert_eq!(out.lines().count(), 1);
		assert!(out.contains("telemetry%0ASupport"));
	}
}
