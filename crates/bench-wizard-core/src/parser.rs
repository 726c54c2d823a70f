// SPDX-License-Identifier: GPL-3.0

use crate::Error;
use std::collections::BTreeMap;

const PALLET_PREFIX: &str = "Pallet:";
const TIME_PREFIX: &str = "Time";

/// Per-extrinsic timings parsed from the raw output of one pallet benchmark
/// run. Created by a single parse pass and read-only thereafter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkOutput {
	pallet: Option<String>,
	extrinsics: BTreeMap<String, f64>,
}

impl BenchmarkOutput {
	/// Parse the raw captured stdout of a pallet benchmark run.
	///
	/// Every block starts with a `Pallet:` header carrying the pallet and
	/// extrinsic names; the first following `Time` line carries the measured
	/// time as its last token. A header without a time line is a format error.
	///
	/// # Arguments
	/// * `raw` - The raw bytes captured from the benchmark tool's stdout.
	pub fn parse(raw: &[u8]) -> Result<Self, Error> {
		let text = String::from_utf8_lossy(raw);
		let lines: Vec<&str> = text.lines().collect();
		let mut output = BenchmarkOutput::default();
		for (index, line) in lines.iter().enumerate() {
			if !line.starts_with(PALLET_PREFIX) {
				continue;
			}
			let (pallet, extrinsic) = parse_header(line)?;
			let time = extract_time(&extrinsic, &lines[index + 1..])?;
			log::debug!("parsed `{pallet}::{extrinsic}`: {time}µs");
			output.pallet.get_or_insert(pallet);
			// Duplicate analysis sections repeat the extrinsic: the first
			// recorded value wins.
			output.extrinsics.entry(extrinsic).or_insert(time);
		}
		Ok(output)
	}

	/// The pallet name reported by the output, if any block was found.
	pub fn pallet(&self) -> Option<&str> {
		self.pallet.as_deref()
	}

	/// The recorded time of a single extrinsic, in microseconds.
	pub fn time(&self, extrinsic: &str) -> Option<f64> {
		self.extrinsics.get(extrinsic).copied()
	}

	/// Sum of the recorded times of the requested extrinsics, in microseconds.
	/// Extrinsics that were never discovered contribute nothing.
	///
	/// # Arguments
	/// * `extrinsics` - Names of the extrinsics to include in the total.
	pub fn total_time<S: AsRef<str>>(&self, extrinsics: &[S]) -> f64 {
		extrinsics.iter().filter_map(|name| self.extrinsics.get(name.as_ref())).sum()
	}
}

// Splits `Pallet: "amm", Extrinsic: "create_pool", ...` into its pallet and
// extrinsic names.
fn parse_header(line: &str) -> Result<(String, String), Error> {
	let mut fields = line.split(',');
	let pallet = field_value(fields.next(), line)?;
	let extrinsic = field_value(fields.next(), line)?;
	Ok((pallet, extrinsic))
}

// Strips the `<label>:` prefix and surrounding quotes from a header field.
fn field_value(field: Option<&str>, line: &str) -> Result<String, Error> {
	field
		.and_then(|field| field.split(':').nth(1))
		.map(|value| value.trim().trim_matches('"').to_string())
		.ok_or_else(|| Error::MalformedHeader(line.to_string()))
}

// Scans forward for the first `Time` line belonging to the current extrinsic.
// Reaching another header, or the end of input, means the output is malformed:
// bailing out here guards against attributing a time to the wrong extrinsic.
fn extract_time(extrinsic: &str, lines: &[&str]) -> Result<f64, Error> {
	for line in lines {
		if line.starts_with(TIME_PREFIX) {
			let value = line
				.split_whitespace()
				.next_back()
				.ok_or_else(|| Error::InvalidFormat(extrinsic.to_string()))?;
			return value.parse().map_err(|_| Error::InvalidTime {
				extrinsic: extrinsic.to_string(),
				value: value.to_string(),
			});
		}
		if line.starts_with(PALLET_PREFIX) {
			return Err(Error::InvalidFormat(extrinsic.to_string()));
		}
	}
	Err(Error::InvalidFormat(extrinsic.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	pub(crate) const BENCHMARK_RESULT: &str = r#"
Pallet: "amm", Extrinsic: "create_pool", Lowest values: [], Highest values: [], Steps: [5], Repeat: 20
Median Slopes Analysis
========
-- Extrinsic Time --

Model:
Time ~=    347.2
              µs

Reads = 11
Writes = 13
Min Squares Analysis
========
-- Extrinsic Time --

Model:
Time ~=    347.2
              µs

Reads = 11
Writes = 13
Pallet: "amm", Extrinsic: "add_liquidity", Lowest values: [], Highest values: [], Steps: [5], Repeat: 20
Median Slopes Analysis
========
-- Extrinsic Time --

Model:
Time ~=    325.8
              µs

Reads = 9
Writes = 8
Min Squares Analysis
========
-- Extrinsic Time --

Model:
Time ~=    325.8
              µs

Reads = 9
Writes = 8
"#;

	#[test]
	fn parse_works() -> Result<(), Error> {
		let output = BenchmarkOutput::parse(BENCHMARK_RESULT.as_bytes())?;
		assert_eq!(output.pallet(), Some("amm"));
		assert_eq!(output.time("create_pool"), Some(347.2));
		assert_eq!(output.time("add_liquidity"), Some(325.8));
		Ok(())
	}

	#[test]
	fn total_time_works() -> Result<(), Error> {
		let output = BenchmarkOutput::parse(BENCHMARK_RESULT.as_bytes())?;
		for (extrinsics, expected) in [
			(vec!["add_liquidity"], 325.8),
			(vec!["create_pool"], 347.2),
			(vec!["create_pool", "add_liquidity"], 673.0),
			(vec![], 0.0),
			(vec!["not existing"], 0.0),
			(vec!["create_pool", "add_liquidity", "", "not existing"], 673.0),
		] {
			assert_eq!(output.total_time(&extrinsics), expected);
		}
		Ok(())
	}

	#[test]
	fn total_time_is_idempotent() -> Result<(), Error> {
		let output = BenchmarkOutput::parse(BENCHMARK_RESULT.as_bytes())?;
		let extrinsics = ["create_pool", "add_liquidity"];
		assert_eq!(output.total_time(&extrinsics), output.total_time(&extrinsics));
		Ok(())
	}

	#[test]
	fn first_duplicate_occurrence_wins() -> Result<(), Error> {
		// Two analysis sections disagreeing in value: the first is kept.
		let raw = r#"
Pallet: "amm", Extrinsic: "create_pool", Steps: [5], Repeat: 20
Time ~=    347.2
Pallet: "amm", Extrinsic: "create_pool", Steps: [5], Repeat: 20
Time ~=    999.9
"#;
		let output = BenchmarkOutput::parse(raw.as_bytes())?;
		assert_eq!(output.time("create_pool"), Some(347.2));
		Ok(())
	}

	#[test]
	fn parse_fails_without_time_line_before_next_header() {
		let raw = r#"
Pallet: "amm", Extrinsic: "create_pool", Steps: [5], Repeat: 20
Reads = 11
Pallet: "amm", Extrinsic: "add_liquidity", Steps: [5], Repeat: 20
Time ~=    325.8
"#;
		assert!(matches!(
			BenchmarkOutput::parse(raw.as_bytes()),
			Err(Error::InvalidFormat(extrinsic)) if extrinsic == "create_pool"
		));
	}

	#[test]
	fn parse_fails_without_time_line_before_end_of_input() {
		let raw = r#"
Pallet: "amm", Extrinsic: "create_pool", Steps: [5], Repeat: 20
Reads = 11
"#;
		assert!(matches!(
			BenchmarkOutput::parse(raw.as_bytes()),
			Err(Error::InvalidFormat(extrinsic)) if extrinsic == "create_pool"
		));
	}

	#[test]
	fn parse_fails_for_malformed_header() {
		let raw = "Pallet: \"amm\"\nTime ~= 347.2\n";
		assert!(matches!(
			BenchmarkOutput::parse(raw.as_bytes()),
			Err(Error::MalformedHeader(..))
		));
	}

	#[test]
	fn parse_fails_for_unparseable_time() {
		let raw = "Pallet: \"amm\", Extrinsic: \"create_pool\"\nTime ~= fast\n";
		assert!(matches!(
			BenchmarkOutput::parse(raw.as_bytes()),
			Err(Error::InvalidTime { extrinsic, value }) if extrinsic == "create_pool" && value == "fast"
		));
	}

	#[test]
	fn parse_of_empty_output_yields_no_timings() -> Result<(), Error> {
		let output = BenchmarkOutput::parse(b"")?;
		assert_eq!(output.pallet(), None);
		assert_eq!(output.total_time(&["create_pool"]), 0.0);
		Ok(())
	}
}
