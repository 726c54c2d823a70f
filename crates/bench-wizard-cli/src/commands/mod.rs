// SPDX-License-Identifier: GPL-3.0

use crate::cli::traits::Cli;
use anyhow::Result;

pub(crate) mod benchmark;
pub(crate) mod check;

// Displays a message to the user, with formatting based on the success status.
pub(crate) fn display_message(message: &str, success: bool, cli: &mut impl Cli) -> Result<()> {
	if success {
		cli.outro(message)?;
		Ok(())
	} else {
		cli.outro_cancel(message)?;
		Err(anyhow::anyhow!(message.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::display_message;
	use crate::cli::MockCli;
	use anyhow::Result;

	#[test]
	fn display_message_works() -> Result<()> {
		let mut cli = MockCli::new().expect_outro("Benchmarks completed successfully!");
		display_message("Benchmarks completed successfully!", true, &mut cli)?;
		cli.verify()?;
		let mut cli = MockCli::new().expect_outro_cancel("Performance check failed.");
		assert!(display_message("Performance check failed.", false, &mut cli).is_err());
		cli.verify()
	}
}
