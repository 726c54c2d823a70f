// SPDX-License-Identifier: GPL-3.0

mod cli;
mod commands;
mod report;
mod style;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, styles=style::get_styles())]
pub struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
#[command(subcommand_required = true)]
enum Commands {
	/// Benchmark the pallets or the database of a Substrate node.
	#[clap(alias = "b")]
	Benchmark(commands::benchmark::BenchmarkArgs),
	/// Check measured pallet performance against reference values.
	#[clap(alias = "c")]
	Check(commands::check::CheckCommand),
}

fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();
	let mut console = cli::Cli;
	match cli.command {
		Commands::Benchmark(args) => match args.command {
			commands::benchmark::Command::Pallet(cmd) => cmd.execute(&mut console),
			commands::benchmark::Command::Db(cmd) => cmd.execute(&mut console),
		},
		Commands::Check(cmd) => cmd.execute(&mut console),
	}
}

#[test]
fn verify_cli() {
	// https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_4/index.html
	use clap::CommandFactory;
	Cli::command().debug_assert()
}
