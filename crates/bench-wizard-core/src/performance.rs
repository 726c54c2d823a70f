// SPDX-License-Identifier: GPL-3.0

use crate::{
	Error,
	baseline::ReferenceBaseline,
	benchmark::{Measurement, PalletRunner},
};
use bench_wizard_common::Status;
use std::path::PathBuf;

/// Default tolerated difference between reference and measured times, in
/// percent of the reference value.
pub const DEFAULT_MARGIN: u8 = 10;

/// Outcome of comparing one measured pallet total against its reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
	/// Name of the compared pallet.
	pub pallet: String,
	/// Reference total time, in microseconds.
	pub reference: f64,
	/// Measured total time, in microseconds.
	pub measured: f64,
	/// `reference - measured`, truncated toward zero.
	pub difference: i64,
	/// Tolerated difference, truncated toward zero.
	pub margin: i64,
	/// Difference as a percentage of the reference; NaN for a zero reference.
	pub percentage: f64,
	/// Whether the difference stayed within the tolerated margin.
	pub accepted: bool,
	/// Whether this comparison came from a second measurement attempt.
	pub rerun: bool,
}

impl Comparison {
	/// Evaluate a measured total against a reference total with a percentage
	/// tolerance margin. Pure and deterministic.
	///
	/// # Arguments
	/// * `pallet` - Name of the compared pallet.
	/// * `reference` - Reference total time, in microseconds.
	/// * `measured` - Measured total time, in microseconds.
	/// * `margin_percent` - Tolerated difference, in percent of the reference.
	/// * `rerun` - Whether this is a second measurement attempt.
	pub fn evaluate(
		pallet: impl Into<String>,
		reference: f64,
		measured: f64,
		margin_percent: u8,
		rerun: bool,
	) -> Self {
		let margin = (reference * f64::from(margin_percent) / 100.0).trunc() as i64;
		let difference = (reference - measured).trunc() as i64;
		// A zero reference makes the percentage undefined; the difference and
		// acceptance are still meaningful.
		let percentage =
			if reference == 0.0 { f64::NAN } else { (difference as f64 / reference) * 100.0 };
		Self {
			pallet: pallet.into(),
			reference,
			measured,
			difference,
			margin,
			percentage,
			accepted: difference >= -margin,
			rerun,
		}
	}
}

/// How a pallet's measurement concluded.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
	/// The benchmark ran and was compared against the reference baseline.
	Measured(Comparison),
	/// The benchmark process exited with a non-zero status; carries the
	/// captured stderr. Not a performance verdict.
	ExecutionError(String),
	/// The captured output did not match the expected benchmark format,
	/// indicating a tooling mismatch rather than a build or runtime failure.
	FormatError(String),
}

/// Per-pallet result of a performance check.
#[derive(Debug, Clone, PartialEq)]
pub struct PalletReport {
	/// Name of the checked pallet.
	pub pallet: String,
	/// Reference total time, fixed at baseline load.
	pub reference: f64,
	/// How the measurement concluded.
	pub status: CheckStatus,
}

impl PalletReport {
	/// Whether the measured total stayed within the tolerated margin. `None`
	/// for pallets that never reached a comparison.
	pub fn accepted(&self) -> Option<bool> {
		match &self.status {
			CheckStatus::Measured(comparison) => Some(comparison.accepted),
			_ => None,
		}
	}
}

/// Drives a batch of pallet measurements against a reference baseline:
/// one blocking measurement per pallet in request order, then a single rerun
/// when exactly one pallet misses its margin.
pub struct PerformanceCheck<'a> {
	baseline: &'a ReferenceBaseline,
	pallets: Vec<String>,
	margin_percent: u8,
	dump_dir: Option<PathBuf>,
}

impl<'a> PerformanceCheck<'a> {
	/// A new performance check for the given pallets.
	///
	/// # Arguments
	/// * `baseline` - The reference values to compare against.
	/// * `pallets` - Names of the pallets to check, in the order to report.
	/// * `margin_percent` - Tolerated difference, in percent of the reference.
	pub fn new(baseline: &'a ReferenceBaseline, pallets: Vec<String>, margin_percent: u8) -> Self {
		Self { baseline, pallets, margin_percent, dump_dir: None }
	}

	/// Also persist each pallet's raw captured stdout to
	/// `<dir>/<pallet>.results`. A rerun overwrites the first dump, so the
	/// file always reflects the reported measurement.
	pub fn with_dump_dir(mut self, dir: PathBuf) -> Self {
		self.dump_dir = Some(dir);
		self
	}

	/// Run the full batch and return one report per requested pallet, in
	/// request order.
	///
	/// # Arguments
	/// * `runner` - The external process collaborator.
	/// * `status` - Observer notified as each pallet completes.
	pub fn run(
		&self,
		runner: &impl PalletRunner,
		status: &impl Status,
	) -> Result<Vec<PalletReport>, Error> {
		// A pallet without reference values has nothing to compare against:
		// surface it before any process is invoked.
		self.baseline.ensure_pallets(&self.pallets)?;

		let mut reports = Vec::with_capacity(self.pallets.len());
		for (index, pallet) in self.pallets.iter().enumerate() {
			status.update(&format!("Running {}/{} (pallet: {pallet})", index + 1, self.pallets.len()));
			reports.push(self.measure(runner, pallet, false)?);
		}

		// A lone regression may be machine noise and is measured once more.
		// Zero misses need no rerun; two or more are treated as systemic and
		// reported as-is.
		let rejected: Vec<usize> = reports
			.iter()
			.enumerate()
			.filter(|(_, report)| report.accepted() == Some(false))
			.map(|(index, _)| index)
			.collect();
		if let [index] = rejected[..] {
			let pallet = reports[index].pallet.clone();
			log::info!("re-measuring `{pallet}`: sole pallet outside its margin");
			status.update(&format!("Re-running (pallet: {pallet})"));
			reports[index] = self.measure(runner, &pallet, true)?;
		}

		Ok(reports)
	}

	fn measure(
		&self,
		runner: &impl PalletRunner,
		pallet: &str,
		rerun: bool,
	) -> Result<PalletReport, Error> {
		let reference = self.baseline.pallet(pallet)?;
		let measurement = Measurement::run(runner, pallet)?;
		if let Some(dir) = &self.dump_dir {
			measurement.dump(dir)?;
		}
		let status = match measurement.error() {
			// Non-zero exit: surfaced verbatim, nothing to parse.
			Some(reason) => CheckStatus::ExecutionError(reason.to_string()),
			None => match measurement.parse() {
				Ok(output) => {
					let measured = output.total_time(reference.extrinsics());
					CheckStatus::Measured(Comparison::evaluate(
						pallet,
						reference.total(),
						measured,
						self.margin_percent,
						rerun,
					))
				},
				Err(error) => CheckStatus::FormatError(error.to_string()),
			},
		};
		Ok(PalletReport { pallet: pallet.to_string(), reference: reference.total(), status })
	}
}
