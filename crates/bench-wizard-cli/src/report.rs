// SPDX-License-Identifier: GPL-3.0

use crate::cli::traits::Cli;
use anyhow::Result;
use bench_wizard_core::{
	db::DbBenchmarkResults,
	performance::{CheckStatus, PalletReport},
};

/// Render the per-pallet comparison table.
///
/// # Arguments
/// * `reports` - Per-pallet results, in request order.
/// * `cli` - Command line interface.
pub(crate) fn render_comparison(reports: &[PalletReport], cli: &mut impl Cli) -> Result<()> {
	cli.plain(format!(
		"{:^25}|{:^27}|{:^15}|{:^16}|{:^12}| {:^10}",
		"Pallet", "Time comparison (µs)", "diff* (µs)", "diff* (%)", "", "Rerun"
	))?;
	for report in reports {
		match &report.status {
			CheckStatus::Measured(comparison) => {
				let times = format!("{:.2} vs {:.2}", comparison.reference, comparison.measured);
				let note = if comparison.accepted { "OK" } else { "FAILED" };
				let rerun = if comparison.rerun { "*" } else { "" };
				cli.plain(format!(
					"{:<25}| {:^25} | {:^14}| {:^14} | {:^10} | {:^10}",
					report.pallet,
					times,
					comparison.difference,
					format!("{:.2}", comparison.percentage),
					note,
					rerun
				))?;
			},
			CheckStatus::ExecutionError(_) => render_failed_row(report, "ERROR", cli)?,
			CheckStatus::FormatError(_) => render_failed_row(report, "INVALID", cli)?,
		}
	}
	// Reasons go below the table to keep the rows aligned.
	for report in reports {
		match &report.status {
			CheckStatus::ExecutionError(reason) | CheckStatus::FormatError(reason) =>
				cli.error(format!("{}: {reason}", report.pallet))?,
			CheckStatus::Measured(_) => {},
		}
	}
	Ok(())
}

fn render_failed_row(report: &PalletReport, note: &str, cli: &mut impl Cli) -> Result<()> {
	cli.plain(format!(
		"{:<25}| {:^25} | {:^14}| {:^14} | {:^10} | {:^10}",
		report.pallet, "-", "-", "-", note, ""
	))?;
	Ok(())
}

/// Render the footnotes explaining the margin semantics.
///
/// # Arguments
/// * `margin` - Tolerated difference, in percent of the reference value.
/// * `cli` - Command line interface.
pub(crate) fn render_footnote(margin: u8, cli: &mut impl Cli) -> Result<()> {
	cli.plain("\nNotes:")?;
	cli.plain(
		"* - diff means the difference between reference total time and total benchmark time of current machine",
	)?;
	cli.plain(format!("* - if diff > {margin}% of ref value -> performance is same or better"))?;
	cli.plain(format!(
		"* - if diff < {margin}% of ref value -> performance is worse and might not be suitable to run node ( You may ask node devs for further clarifications )"
	))?;
	Ok(())
}

/// Render the database benchmark results table.
///
/// # Arguments
/// * `results` - Read and write benchmark records.
/// * `cli` - Command line interface.
pub(crate) fn render_db_results(results: &DbBenchmarkResults, cli: &mut impl Cli) -> Result<()> {
	cli.plain("Database benchmark results:\n")?;
	cli.plain(format!("{:^75}|{:^26}|{:^21}|", "Name", "Raw average(ns)", "Average(ns)"))?;
	for result in results.read.iter().chain(results.write.iter()) {
		cli.plain(format!(
			"{:<75}| {:^25}| {:^20}|",
			result.name, result.raw_average, result.average
		))?;
	}
	cli.plain("")?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cli::MockCli;
	use bench_wizard_core::{db::DbBenchmark, performance::Comparison};

	#[test]
	fn render_comparison_works() -> Result<()> {
		let reports = vec![
			PalletReport {
				pallet: "amm".to_string(),
				reference: 1000.0,
				status: CheckStatus::Measured(Comparison::evaluate("amm", 1000.0, 950.0, 10, false)),
			},
			PalletReport {
				pallet: "exchange".to_string(),
				reference: 500.0,
				status: CheckStatus::Measured(Comparison::evaluate(
					"exchange",
					500.0,
					700.0,
					10,
					true,
				)),
			},
			PalletReport {
				pallet: "lbp".to_string(),
				reference: 100.0,
				status: CheckStatus::ExecutionError("no such pallet".to_string()),
			},
		];
		let mut cli = MockCli::new()
			.expect_plain(format!(
				"{:^25}|{:^27}|{:^15}|{:^16}|{:^12}| {:^10}",
				"Pallet", "Time comparison (µs)", "diff* (µs)", "diff* (%)", "", "Rerun"
			))
			.expect_plain(format!(
				"{:<25}| {:^25} | {:^14}| {:^14} | {:^10} | {:^10}",
				"amm", "1000.00 vs 950.00", 50, "5.00", "OK", ""
			))
			.expect_plain(format!(
				"{:<25}| {:^25} | {:^14}| {:^14} | {:^10} | {:^10}",
				"exchange", "500.00 vs 700.00", -200, "-40.00", "FAILED", "*"
			))
			.expect_plain(format!(
				"{:<25}| {:^25} | {:^14}| {:^14} | {:^10} | {:^10}",
				"lbp", "-", "-", "-", "ERROR", ""
			))
			.expect_error("lbp: no such pallet");
		render_comparison(&reports, &mut cli)?;
		cli.verify()
	}

	#[test]
	fn render_footnote_works() -> Result<()> {
		let mut cli = MockCli::new()
			.expect_plain("\nNotes:")
			.expect_plain("* - if diff > 10% of ref value -> performance is same or better");
		render_footnote(10, &mut cli)?;
		cli.verify()
	}

	#[test]
	fn render_db_results_works() -> Result<()> {
		let results = DbBenchmarkResults {
			read: vec![DbBenchmark {
				name: "Trie read benchmark(db_type = RocksDb)".to_string(),
				raw_average: 103829,
				average: 63527,
			}],
			write: vec![DbBenchmark {
				name: "Trie write benchmark(db_type = RocksDb)".to_string(),
				raw_average: 128011,
				average: 89124,
			}],
		};
		let mut cli = MockCli::new()
			.expect_plain("Database benchmark results:\n")
			.expect_plain(format!("{:^75}|{:^26}|{:^21}|", "Name", "Raw average(ns)", "Average(ns)"))
			.expect_plain(format!(
				"{:<75}| {:^25}| {:^20}|",
				"Trie read benchmark(db_type = RocksDb)", 103829, 63527
			))
			.expect_plain(format!(
				"{:<75}| {:^25}| {:^20}|",
				"Trie write benchmark(db_type = RocksDb)", 128011, 89124
			));
		render_db_results(&results, &mut cli)?;
		cli.verify()
	}
}
