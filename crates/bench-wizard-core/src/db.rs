// SPDX-License-Identifier: GPL-3.0

use crate::Error;
use bench_wizard_common::{git, process::run_captured};
use serde::Deserialize;
use std::path::Path;

const SUBSTRATE_REPOSITORY: &str = "https://github.com/paritytech/substrate.git";
const READ_BENCHMARK: &str = "::trie::read::large";
const WRITE_BENCHMARK: &str = "::trie::write::large";

/// A single database benchmark record as emitted by `node-bench --json`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DbBenchmark {
	/// Human readable name of the benchmark.
	pub name: String,
	/// Average execution time without outlier filtering, in nanoseconds.
	pub raw_average: u64,
	/// Average execution time, in nanoseconds.
	pub average: u64,
}

/// Read and write results of the database benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbBenchmarkResults {
	/// Trie read benchmark records.
	pub read: Vec<DbBenchmark>,
	/// Trie write benchmark records.
	pub write: Vec<DbBenchmark>,
}

/// Ensure the Substrate repository exists at `path`, cloning it when absent.
/// Returns whether a clone was performed.
///
/// # Arguments
/// * `path` - Location of the Substrate repository.
pub fn ensure_substrate_repository(path: &Path) -> Result<bool, Error> {
	if path.is_dir() {
		return Ok(false);
	}
	log::info!("cloning Substrate repository into {}", path.display());
	git::clone(SUBSTRATE_REPOSITORY, path).map_err(Error::Common)?;
	Ok(true)
}

/// Run the trie read and write benchmarks in the given Substrate repository.
///
/// # Arguments
/// * `repository` - Location of the Substrate repository.
pub fn run_db_benchmarks(repository: &Path) -> Result<DbBenchmarkResults, Error> {
	Ok(DbBenchmarkResults {
		read: run_node_bench(repository, READ_BENCHMARK)?,
		write: run_node_bench(repository, WRITE_BENCHMARK)?,
	})
}

// One `node-bench` invocation, with its JSON output decoded.
fn run_node_bench(repository: &Path, benchmark: &str) -> Result<Vec<DbBenchmark>, Error> {
	let args: Vec<String> = ["run", "--release", "-p", "node-bench", "--", benchmark, "--json"]
		.map(String::from)
		.to_vec();
	let output = run_captured("cargo", &args, Some(repository))?;
	if !output.success {
		return Err(Error::DbBenchmark {
			benchmark: benchmark.to_string(),
			reason: output.stderr_text(),
		});
	}
	Ok(serde_json::from_slice(&output.stdout)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn db_benchmark_deserializes() -> Result<(), Error> {
		let json = r#"[
			{ "name": "Trie read benchmark(db_type = RocksDb)", "raw_average": 103829, "average": 63527 },
			{ "name": "Trie read benchmark(db_type = ParityDb)", "raw_average": 88204, "average": 61890 }
		]"#;
		let benchmarks: Vec<DbBenchmark> = serde_json::from_str(json)?;
		assert_eq!(
			benchmarks[0],
			DbBenchmark {
				name: "Trie read benchmark(db_type = RocksDb)".to_string(),
				raw_average: 103829,
				average: 63527,
			}
		);
		assert_eq!(benchmarks[1].average, 61890);
		Ok(())
	}

	#[test]
	fn ensure_substrate_repository_skips_existing_directory() -> Result<(), Error> {
		let temp_dir = tempfile::tempdir()?;
		assert!(!ensure_substrate_repository(temp_dir.path())?);
		Ok(())
	}
}
