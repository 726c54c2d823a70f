// SPDX-License-Identifier: GPL-3.0

use crate::{cli::traits::*, commands::display_message};
use bench_wizard_core::{
	DEFAULT_MANIFEST,
	benchmark::{CargoBench, CargoRunner, Measurement, PalletRunner, build_node},
};
use clap::Args;
use std::path::PathBuf;

/// Benchmark the node's pallets and optionally generate weight files.
#[derive(Args, Debug, Default)]
pub(crate) struct BenchmarkPallet {
	/// Pallet(s) to benchmark.
	#[arg(short, long = "pallet", required = true)]
	pub(crate) pallets: Vec<String>,
	/// Path to the node manifest.
	#[arg(long, default_value = DEFAULT_MANIFEST)]
	pub(crate) manifest: PathBuf,
	/// Directory to dump the raw benchmark results.
	#[arg(short, long)]
	pub(crate) dump_results: Option<PathBuf>,
	/// Directory for the generated weight files, one `<pallet>.rs` per pallet.
	#[arg(short, long)]
	pub(crate) output_dir: Option<PathBuf>,
	/// Path to a custom weight file template.
	#[arg(short, long)]
	pub(crate) template: Option<PathBuf>,
}

impl BenchmarkPallet {
	/// Executes the command.
	pub(crate) fn execute(self, cli: &mut impl Cli) -> anyhow::Result<()> {
		cli.intro("Benchmarking your pallets")?;
		// Every pallet run depends on this one build.
		let spinner = cli.spinner();
		spinner.start("Compiling node with runtime benchmarks - this may take a while...");
		if let Err(e) = build_node(&self.manifest) {
			spinner.error("Compilation failed");
			return display_message(&e.to_string(), false, cli);
		}
		spinner.stop("Node compiled");

		let runner = CargoRunner::new(CargoBench {
			manifest: self.manifest.clone(),
			output_dir: self.output_dir.clone(),
			template: self.template.clone(),
			..Default::default()
		});
		self.benchmark(&runner, cli)
	}

	// Runs the benchmarks with the supplied runner and reports the outcome.
	fn benchmark(&self, runner: &impl PalletRunner, cli: &mut impl Cli) -> anyhow::Result<()> {
		cli.info(format!("Benchmarking: {}", self.pallets.join(", ")))?;
		cli.warning("NOTE: this may take some time...")?;
		let spinner = cli.spinner();
		spinner.start("Running benchmarks...");
		let mut measurements = Vec::with_capacity(self.pallets.len());
		for (index, pallet) in self.pallets.iter().enumerate() {
			spinner.set_message(&format!(
				"Running {}/{} (pallet: {pallet})",
				index + 1,
				self.pallets.len()
			));
			measurements.push(Measurement::run(runner, pallet)?);
		}
		spinner.stop("Benchmarks finished");

		if let Some(dir) = &self.dump_results {
			for measurement in &measurements {
				measurement.dump(dir)?;
			}
		}

		let mut failures = 0;
		for measurement in &measurements {
			match measurement.error() {
				Some(reason) => {
					failures += 1;
					cli.error(format!("{}: {reason}", measurement.pallet()))?;
				},
				None => cli.success(format!("{}: completed", measurement.pallet()))?,
			}
		}
		match failures {
			0 => display_message("Benchmarks completed successfully!", true, cli),
			_ => display_message(&format!("{failures} benchmark(s) failed."), false, cli),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cli::MockCli;
	use bench_wizard_core::{Error, benchmark::RawRun};
	use std::fs;

	// Serves one canned raw run per pallet.
	struct StubRunner;

	impl PalletRunner for StubRunner {
		fn invoke(&self, pallet: &str) -> Result<RawRun, Error> {
			match pallet {
				"exchange" => Ok(RawRun::failure("no such pallet")),
				_ => Ok(RawRun::success(format!(
					"Pallet: \"{pallet}\", Extrinsic: \"create_pool\", Steps: [5], Repeat: 20\nTime ~=    347.2\n"
				))),
			}
		}
	}

	fn command(pallets: &[&str]) -> BenchmarkPallet {
		BenchmarkPallet {
			pallets: pallets.iter().map(|pallet| pallet.to_string()).collect(),
			..Default::default()
		}
	}

	#[test]
	fn benchmark_works() -> anyhow::Result<()> {
		let mut cli = MockCli::new()
			.expect_info("Benchmarking: amm")
			.expect_warning("NOTE: this may take some time...")
			.expect_success("amm: completed")
			.expect_outro("Benchmarks completed successfully!");
		command(&["amm"]).benchmark(&StubRunner, &mut cli)?;
		cli.verify()
	}

	#[test]
	fn benchmark_reports_execution_errors() -> anyhow::Result<()> {
		let mut cli = MockCli::new()
			.expect_info("Benchmarking: amm, exchange")
			.expect_success("amm: completed")
			.expect_error("exchange: no such pallet")
			.expect_outro_cancel("1 benchmark(s) failed.");
		assert!(command(&["amm", "exchange"]).benchmark(&StubRunner, &mut cli).is_err());
		cli.verify()
	}

	#[test]
	fn benchmark_dumps_raw_results() -> anyhow::Result<()> {
		let temp_dir = tempfile::tempdir()?;
		let mut cli = MockCli::new();
		let mut command = command(&["amm"]);
		command.dump_results = Some(temp_dir.path().to_path_buf());
		command.benchmark(&StubRunner, &mut cli)?;
		let dumped = fs::read_to_string(temp_dir.path().join("amm.results"))?;
		assert!(dumped.starts_with("Pallet: \"amm\""));
		cli.verify()
	}
}
