// SPDX-License-Identifier: GPL-3.0

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("Failed to build the node: {0}")]
	Build(String),

	#[error(transparent)]
	Common(#[from] bench_wizard_common::Error),

	#[error("Failed to run database benchmark `{benchmark}`: {reason}")]
	DbBenchmark { benchmark: String, reason: String },

	#[error("Invalid reference value for `{pallet}::{extrinsic}`: {value}")]
	InvalidBaseline { pallet: String, extrinsic: String, value: String },

	#[error("Failed to find time for extrinsic `{0}`: invalid benchmark output")]
	InvalidFormat(String),

	#[error("Invalid time value `{value}` for extrinsic `{extrinsic}`")]
	InvalidTime { extrinsic: String, value: String },

	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Malformed benchmark header: {0}")]
	MalformedHeader(String),

	#[error("No reference values for pallet `{0}`")]
	MissingBaseline(String),
}
