// SPDX-License-Identifier: GPL-3.0

use clap::{Args, Subcommand};

pub(crate) mod db;
pub(crate) mod pallet;

/// Arguments for benchmarking a node.
#[derive(Args)]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct BenchmarkArgs {
	#[command(subcommand)]
	pub(crate) command: Command,
}

/// Benchmark the pallets or the database of a node.
#[derive(Subcommand)]
pub(crate) enum Command {
	/// Benchmark the extrinsic execution times of the node's pallets.
	#[clap(alias = "p")]
	Pallet(pallet::BenchmarkPallet),
	/// Benchmark the database read and write operations.
	#[clap(alias = "d")]
	Db(db::BenchmarkDb),
}
