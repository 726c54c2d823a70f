// SPDX-License-Identifier: GPL-3.0

use crate::{cli::traits::*, commands::display_message, report};
use bench_wizard_core::db::{ensure_substrate_repository, run_db_benchmarks};
use clap::Args;
use std::path::PathBuf;

/// Benchmark the database read and write operations of Substrate.
#[derive(Args, Debug)]
pub(crate) struct BenchmarkDb {
	/// Path to the Substrate repository (cloned when absent).
	#[arg(long, default_value = "./substrate")]
	pub(crate) substrate_repo_path: PathBuf,
}

impl BenchmarkDb {
	/// Executes the command.
	pub(crate) fn execute(self, cli: &mut impl Cli) -> anyhow::Result<()> {
		cli.intro("Substrate database benchmark")?;
		cli.warning("NOTE: this may take some time...")?;

		let spinner = cli.spinner();
		spinner.start("Preparing the Substrate repository...");
		match ensure_substrate_repository(&self.substrate_repo_path) {
			Ok(true) => spinner.stop(&format!(
				"Substrate repository cloned into {}",
				self.substrate_repo_path.display()
			)),
			Ok(false) => spinner.stop("Substrate repository found"),
			Err(e) => {
				spinner.error("Failed to prepare the Substrate repository");
				return display_message(&e.to_string(), false, cli);
			},
		}

		let spinner = cli.spinner();
		spinner.start("Performing database benchmark - this may take a while...");
		let results = match run_db_benchmarks(&self.substrate_repo_path) {
			Ok(results) => {
				spinner.stop("Database benchmark finished");
				results
			},
			Err(e) => {
				spinner.error("Database benchmark failed");
				return display_message(&e.to_string(), false, cli);
			},
		};

		report::render_db_results(&results, cli)?;
		display_message("Database benchmark completed successfully!", true, cli)
	}
}
