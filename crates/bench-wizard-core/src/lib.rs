// SPDX-License-Identifier: GPL-3.0

//! Drives a Substrate node's pallet benchmarks: runs the external benchmark
//! tool per pallet, parses its textual output into per-extrinsic timings and
//! compares the totals against a stored reference baseline within a
//! percentage tolerance.

pub mod baseline;
pub mod benchmark;
pub mod db;
pub mod errors;
pub mod parser;
pub mod performance;

pub use baseline::{PalletBaseline, ReferenceBaseline};
pub use bench_wizard_common::Status;
pub use benchmark::{
	CargoBench, CargoRunner, DEFAULT_MANIFEST, Measurement, PalletRunner, RawRun, RunStatus,
	build_node,
};
pub use db::{DbBenchmark, DbBenchmarkResults, ensure_substrate_repository, run_db_benchmarks};
pub use errors::Error;
pub use parser::BenchmarkOutput;
pub use performance::{CheckStatus, Comparison, DEFAULT_MARGIN, PalletReport, PerformanceCheck};
