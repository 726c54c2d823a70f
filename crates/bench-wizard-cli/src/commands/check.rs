// SPDX-License-Identifier: GPL-3.0

use crate::{cli::traits::*, commands::display_message, report};
use bench_wizard_core::{
	DEFAULT_MANIFEST, Status,
	baseline::ReferenceBaseline,
	benchmark::{CargoBench, CargoRunner, PalletRunner, build_node},
	performance::{DEFAULT_MARGIN, PerformanceCheck},
};
use clap::Args;
use std::path::PathBuf;

/// Check the measured pallet performance against reference values.
#[derive(Args, Debug)]
pub(crate) struct CheckCommand {
	/// Pallet(s) to check.
	#[arg(short, long = "pallet", required = true)]
	pub(crate) pallets: Vec<String>,
	/// Reference values - json format.
	#[arg(short, long)]
	pub(crate) reference_values: PathBuf,
	/// Tolerated difference between reference and measured times, in percent.
	#[arg(short, long, default_value_t = DEFAULT_MARGIN)]
	pub(crate) margin: u8,
	/// Path to the node manifest.
	#[arg(long, default_value = DEFAULT_MANIFEST)]
	pub(crate) manifest: PathBuf,
	/// Directory to dump the raw benchmark results.
	#[arg(short, long)]
	pub(crate) dump_results: Option<PathBuf>,
}

// Forwards progress updates to the active spinner.
struct Progress<'a>(&'a dyn Spinner);

impl Status for Progress<'_> {
	fn update(&self, status: &str) {
		self.0.set_message(status);
	}
}

impl CheckCommand {
	/// Executes the command.
	pub(crate) fn execute(self, cli: &mut impl Cli) -> anyhow::Result<()> {
		cli.intro("Substrate node performance check")?;
		let baseline = match ReferenceBaseline::from_path(&self.reference_values) {
			Ok(baseline) => baseline,
			Err(e) => return display_message(&e.to_string(), false, cli),
		};

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
			..Default::default()
		});
		self.check(&baseline, &runner, cli)
	}

	// Runs the measurements with the supplied runner and renders the outcome.
	fn check(
		&self,
		baseline: &ReferenceBaseline,
		runner: &impl PalletRunner,
		cli: &mut impl Cli,
	) -> anyhow::Result<()> {
		cli.info(format!("Benchmarking: {}", self.pallets.join(", ")))?;
		cli.warning("NOTE: this may take some time...")?;

		let mut check = PerformanceCheck::new(baseline, self.pallets.clone(), self.margin);
		if let Some(dir) = &self.dump_results {
			check = check.with_dump_dir(dir.clone());
		}

		let spinner = cli.spinner();
		spinner.start("Running benchmarks...");
		let reports = match check.run(runner, &Progress(&*spinner)) {
			Ok(reports) => {
				spinner.stop("Benchmarks finished");
				reports
			},
			Err(e) => {
				spinner.error("Benchmarks failed");
				return display_message(&e.to_string(), false, cli);
			},
		};

		report::render_comparison(&reports, cli)?;
		report::render_footnote(self.margin, cli)?;
		match reports.iter().all(|report| report.accepted() == Some(true)) {
			true => display_message("Performance is acceptable.", true, cli),
			false => display_message("Performance check failed.", false, cli),
		}
	}
}
