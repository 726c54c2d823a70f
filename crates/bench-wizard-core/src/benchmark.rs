// SPDX-License-Identifier: GPL-3.0

use crate::{Error, parser::BenchmarkOutput};
use bench_wizard_common::process::{CommandOutput, run_captured};
use std::{
	fs,
	path::{Path, PathBuf},
};

/// Default node manifest used to build and run the benchmarks.
pub const DEFAULT_MANIFEST: &str = "node/Cargo.toml";

/// Exit status of one external benchmark invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
	/// The process exited successfully and its output can be parsed.
	Success,
	/// The process exited with a non-zero status; carries the captured stderr.
	Failure(String),
}

/// Raw captured output of one external benchmark invocation. Produced once
/// per invocation attempt and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRun {
	stdout: Vec<u8>,
	status: RunStatus,
}

impl RawRun {
	/// A successful run from captured stdout bytes.
	pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
		Self { stdout: stdout.into(), status: RunStatus::Success }
	}

	/// A failed run with the captured stderr text.
	pub fn failure(stderr: impl Into<String>) -> Self {
		Self { stdout: Vec::new(), status: RunStatus::Failure(stderr.into()) }
	}

	/// The raw bytes captured from stdout.
	pub fn stdout(&self) -> &[u8] {
		&self.stdout
	}

	/// The exit status of the invocation.
	pub fn status(&self) -> &RunStatus {
		&self.status
	}

	/// The captured stderr text when the invocation failed.
	pub fn error(&self) -> Option<&str> {
		match &self.status {
			RunStatus::Failure(reason) => Some(reason),
			RunStatus::Success => None,
		}
	}
}

impl From<CommandOutput> for RawRun {
	fn from(output: CommandOutput) -> Self {
		match output.success {
			true => Self { stdout: output.stdout, status: RunStatus::Success },
			false => {
				let reason = output.stderr_text();
				Self { stdout: output.stdout, status: RunStatus::Failure(reason) }
			}
		}
	}
}

/// Assembles the external `cargo run … -- benchmark` invocation for a pallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoBench {
	/// Path to the node manifest.
	pub manifest: PathBuf,
	/// Chain specification to benchmark against.
	pub chain: String,
	/// How many samples to take across the variable components.
	pub steps: u32,
	/// How many repetitions of each benchmark to run.
	pub repeat: u32,
	/// Extrinsic selector.
	pub extrinsic: String,
	/// Execution strategy.
	pub execution: String,
	/// Method for executing the wasm runtime.
	pub wasm_execution: String,
	/// Number of 64KB heap pages.
	pub heap_pages: u32,
	/// Directory for the generated weight files, one `<pallet>.rs` per pallet.
	pub output_dir: Option<PathBuf>,
	/// Path to a custom weight file template.
	pub template: Option<PathBuf>,
}

impl Default for CargoBench {
	fn default() -> Self {
		Self {
			manifest: DEFAULT_MANIFEST.into(),
			chain: "dev".to_string(),
			steps: 5,
			repeat: 20,
			extrinsic: "*".to_string(),
			execution: "wasm".to_string(),
			wasm_execution: "compiled".to_string(),
			heap_pages: 4096,
			output_dir: None,
			template: None,
		}
	}
}

impl CargoBench {
	/// The arguments of the benchmark invocation for the given pallet.
	///
	/// # Arguments
	/// * `pallet` - Name of the pallet to benchmark.
	pub fn args(&self, pallet: &str) -> Vec<String> {
		let mut args = vec![
			"run".to_string(),
			"--release".to_string(),
			"--features=runtime-benchmarks".to_string(),
			format!("--manifest-path={}", self.manifest.display()),
			"--".to_string(),
			"benchmark".to_string(),
			format!("--pallet={pallet}"),
			format!("--chain={}", self.chain),
			format!("--steps={}", self.steps),
			format!("--repeat={}", self.repeat),
			format!("--extrinsic={}", self.extrinsic),
			format!("--execution={}", self.execution),
			format!("--wasm-execution={}", self.wasm_execution),
			format!("--heap-pages={}", self.heap_pages),
		];
		if let Some(dir) = &self.output_dir {
			args.push(format!("--output={}", dir.join(format!("{pallet}.rs")).display()));
		}
		if let Some(template) = &self.template {
			args.push(format!("--template={}", template.display()));
		}
		args
	}
}

/// An external process producing raw benchmark output for a single pallet.
pub trait PalletRunner {
	/// Invoke the external benchmark tool for a pallet. A non-zero exit status
	/// is captured in the returned [`RawRun`]; only a failure to launch the
	/// process at all is an error.
	fn invoke(&self, pallet: &str) -> Result<RawRun, Error>;
}

/// Runs pallet benchmarks through `cargo run … -- benchmark`.
#[derive(Debug, Clone, Default)]
pub struct CargoRunner {
	bench: CargoBench,
}

impl CargoRunner {
	pub fn new(bench: CargoBench) -> Self {
		Self { bench }
	}
}

impl PalletRunner for CargoRunner {
	fn invoke(&self, pallet: &str) -> Result<RawRun, Error> {
		let output = run_captured("cargo", &self.bench.args(pallet), None)?;
		Ok(output.into())
	}
}

/// One pallet's benchmark run: the pallet name and the raw output it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
	pallet: String,
	raw: RawRun,
}

impl Measurement {
	/// Measure a single pallet using the supplied runner.
	///
	/// # Arguments
	/// * `runner` - The external process collaborator.
	/// * `pallet` - Name of the pallet to measure.
	pub fn run(runner: &impl PalletRunner, pallet: &str) -> Result<Self, Error> {
		Ok(Self { pallet: pallet.to_string(), raw: runner.invoke(pallet)? })
	}

	/// Name of the measured pallet.
	pub fn pallet(&self) -> &str {
		&self.pallet
	}

	/// The raw run this measurement derived from.
	pub fn raw(&self) -> &RawRun {
		&self.raw
	}

	/// The captured stderr text when the invocation failed.
	pub fn error(&self) -> Option<&str> {
		self.raw.error()
	}

	/// Parse the run into per-extrinsic timings.
	pub fn parse(&self) -> Result<BenchmarkOutput, Error> {
		BenchmarkOutput::parse(self.raw.stdout())
	}

	/// Write the raw captured output verbatim to `<dir>/<pallet>.results`.
	///
	/// # Arguments
	/// * `dir` - Destination directory.
	pub fn dump(&self, dir: &Path) -> Result<(), Error> {
		fs::write(dir.join(format!("{}.results", self.pallet)), self.raw.stdout())?;
		Ok(())
	}
}

/// Build the node with runtime benchmarks enabled. Every pallet measurement
/// depends on this one build, so a failure here is fatal for the whole batch.
///
/// # Arguments
/// * `manifest` - Path to the node manifest.
pub fn build_node(manifest: &Path) -> Result<(), Error> {
	let args = vec![
		"build".to_string(),
		"--release".to_string(),
		"--features=runtime-benchmarks".to_string(),
		format!("--manifest-path={}", manifest.display()),
	];
	let output = run_captured("cargo", &args, None)?;
	if !output.success {
		return Err(Error::Build(output.stderr_text()));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn args_works() {
		let bench = CargoBench::default();
		assert_eq!(
			bench.args("amm"),
			[
				"run",
				"--release",
				"--features=runtime-benchmarks",
				"--manifest-path=node/Cargo.toml",
				"--",
				"benchmark",
				"--pallet=amm",
				"--chain=dev",
				"--steps=5",
				"--repeat=20",
				"--extrinsic=*",
				"--execution=wasm",
				"--wasm-execution=compiled",
				"--heap-pages=4096",
			]
		);
	}

	#[test]
	fn args_includes_output_and_template() {
		let bench = CargoBench {
			output_dir: Some("weights".into()),
			template: Some("weights.hbs".into()),
			..Default::default()
		};
		let args = bench.args("exchange");
		assert!(args.contains(&format!("--output={}", Path::new("weights").join("exchange.rs").display())));
		assert!(args.contains(&"--template=weights.hbs".to_string()));
	}

	#[test]
	fn raw_run_from_command_output_works() {
		let success: RawRun =
			CommandOutput { stdout: b"out".to_vec(), stderr: Vec::new(), success: true }.into();
		assert_eq!(success, RawRun::success(b"out".to_vec()));
		assert_eq!(success.error(), None);

		let failure: RawRun =
			CommandOutput { stdout: Vec::new(), stderr: b"no such pallet".to_vec(), success: false }
				.into();
		assert_eq!(failure.error(), Some("no such pallet"));
	}

	#[test]
	fn dump_writes_raw_output() -> Result<(), Error> {
		let temp_dir = tempfile::tempdir()?;
		struct StubRunner;
		impl PalletRunner for StubRunner {
			fn invoke(&self, _pallet: &str) -> Result<RawRun, Error> {
				Ok(RawRun::success(b"raw benchmark output".to_vec()))
			}
		}
		let measurement = Measurement::run(&StubRunner, "amm")?;
		measurement.dump(temp_dir.path())?;
		assert_eq!(
			fs::read(temp_dir.path().join("amm.results"))?,
			b"raw benchmark output"
		);
		Ok(())
	}
}
