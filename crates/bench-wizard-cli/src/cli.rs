// SPDX-License-Identifier: GPL-3.0

use std::fmt::Display;
#[cfg(not(test))]
use std::{thread::sleep, time::Duration};
#[cfg(test)]
pub(crate) use tests::MockCli;

pub(crate) mod traits {
	use std::{fmt::Display, io::Result};

	/// A command line interface.
	pub trait Cli {
		/// Prints an error message.
		fn error(&mut self, text: impl Display) -> Result<()>;
		/// Prints an info message.
		fn info(&mut self, text: impl Display) -> Result<()>;
		/// Prints a header of the prompt sequence.
		fn intro(&mut self, title: impl Display) -> Result<()>;
		/// Prints a footer of the prompt sequence.
		fn outro(&mut self, message: impl Display) -> Result<()>;
		/// Prints a footer of the prompt sequence with a failure style.
		fn outro_cancel(&mut self, message: impl Display) -> Result<()>;
		/// Prints a plain message.
		fn plain(&mut self, message: impl Display) -> Result<()>;
		/// Prints a success message.
		fn success(&mut self, message: impl Display) -> Result<()>;
		/// Prints a warning message.
		fn warning(&mut self, message: impl Display) -> Result<()>;
		/// Constructs a new [`Spinner`].
		fn spinner(&mut self) -> Box<dyn Spinner + Send>;
	}

	/// A spinner.
	pub trait Spinner: Send {
		/// Starts the spinner.
		fn start(&self, message: &str);
		/// Sets the message of the spinner.
		fn set_message(&self, message: &str);
		/// Stops the spinner.
		fn stop(&self, message: &str);
		/// Stops the spinner with an error message.
		fn error(&self, message: &str);
	}
}

/// A command line interface using cliclack.
pub(crate) struct Cli;

impl traits::Cli for Cli {
	/// Prints an error message.
	fn error(&mut self, text: impl Display) -> std::io::Result<()> {
		cliclack::log::error(text)
	}

	/// Prints an info message.
	fn info(&mut self, text: impl Display) -> std::io::Result<()> {
		cliclack::log::info(text)
	}

	/// Prints a header of the prompt sequence.
	fn intro(&mut self, title: impl Display) -> std::io::Result<()> {
		cliclack::clear_screen()?;
		cliclack::set_theme(crate::style::Theme);
		cliclack::intro(format!(
			"{}: {title}",
			console::style(" Bench Wizard ").black().on_cyan()
		))
	}

	/// Prints a footer of the prompt sequence.
	fn outro(&mut self, message: impl Display) -> std::io::Result<()> {
		cliclack::outro(message)
	}

	/// Prints a footer of the prompt sequence with a failure style.
	fn outro_cancel(&mut self, message: impl Display) -> std::io::Result<()> {
		cliclack::outro_cancel(message)
	}

	fn plain(&mut self, message: impl Display) -> std::io::Result<()> {
		println!("{message}");
		Ok(())
	}

	/// Prints a success message.
	fn success(&mut self, message: impl Display) -> std::io::Result<()> {
		cliclack::log::success(message)
	}

	/// Prints a warning message.
	fn warning(&mut self, message: impl Display) -> std::io::Result<()> {
		cliclack::log::warning(message)?;
		#[cfg(not(test))]
		sleep(Duration::from_secs(1));
		Ok(())
	}

	fn spinner(&mut self) -> Box<dyn traits::Spinner + Send> {
		Box::new(Spinner { inner: std::sync::Arc::new(std::sync::Mutex::new(None)) })
	}
}

/// A spinner using cliclack.
#[derive(Clone)]
struct Spinner {
	inner: std::sync::Arc<std::sync::Mutex<Option<cliclack::ProgressBar>>>,
}

impl traits::Spinner for Spinner {
	fn start(&self, message: &str) {
		let spinner = cliclack::spinner();
		spinner.start(message);
		if let Ok(mut inner) = self.inner.lock() {
			*inner = Some(spinner);
		}
	}

	fn set_message(&self, message: &str) {
		if let Ok(mut inner) = self.inner.lock() &&
			let Some(ref mut spinner) = *inner
		{
			spinner.set_message(message);
		}
	}

	fn stop(&self, message: &str) {
		if let Ok(mut inner) = self.inner.lock() &&
			let Some(spinner) = inner.take()
		{
			spinner.stop(message);
		}
	}

	fn error(&self, message: &str) {
		if let Ok(mut inner) = self.inner.lock() &&
			let Some(spinner) = inner.take()
		{
			spinner.error(message);
		}
	}
}
