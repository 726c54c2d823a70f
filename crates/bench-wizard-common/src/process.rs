// SPDX-License-Identifier: GPL-3.0

use crate::Error;
use duct::cmd;
use std::path::Path;

/// Captured output of one external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
	/// Raw bytes captured from standard output.
	pub stdout: Vec<u8>,
	/// Raw bytes captured from standard error.
	pub stderr: Vec<u8>,
	/// Whether the command exited with a zero status.
	pub success: bool,
}

impl CommandOutput {
	/// The captured standard error, decoded for display.
	pub fn stderr_text(&self) -> String {
		String::from_utf8_lossy(&self.stderr).into_owned()
	}
}

/// Run a command with both output streams captured. A non-zero exit status is
/// returned as data rather than an error, so callers decide how to surface it.
///
/// # Arguments
/// * `program` - The program to run.
/// * `args` - Arguments passed to the program.
/// * `dir` - An optional working directory for the invocation.
pub fn run_captured(program: &str, args: &[String], dir: Option<&Path>) -> Result<CommandOutput, Error> {
	log::debug!("running `{program} {}`", args.join(" "));
	let mut expression = cmd(program, args).stdout_capture().stderr_capture().unchecked();
	if let Some(dir) = dir {
		expression = expression.dir(dir);
	}
	let output = expression.run()?;
	Ok(CommandOutput {
		stdout: output.stdout,
		stderr: output.stderr,
		success: output.status.success(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn run_captured_works() -> Result<(), Error> {
		let output = run_captured("sh", &["-c".to_string(), "printf hello".to_string()], None)?;
		assert!(output.success);
		assert_eq!(output.stdout, b"hello");
		assert!(output.stderr.is_empty());
		Ok(())
	}

	#[test]
	fn run_captured_reports_failure_as_data() -> Result<(), Error> {
		let output = run_captured(
			"sh",
			&["-c".to_string(), "echo boom >&2; exit 1".to_string()],
			None,
		)?;
		assert!(!output.success);
		assert_eq!(output.stderr_text().trim(), "boom");
		Ok(())
	}

	#[test]
	fn run_captured_respects_working_directory() -> Result<(), Error> {
		let temp_dir = tempfile::tempdir()?;
		let output =
			run_captured("sh", &["-c".to_string(), "pwd".to_string()], Some(temp_dir.path()))?;
		assert!(output.success);
		let reported = String::from_utf8_lossy(&output.stdout);
		assert_eq!(
			Path::new(reported.trim()).canonicalize()?,
			temp_dir.path().canonicalize()?
		);
		Ok(())
	}

	#[test]
	fn run_captured_fails_for_missing_program() {
		assert!(matches!(
			run_captured("program-that-does-not-exist", &[], None),
			Err(Error::IO(..))
		));
	}
}
