// SPDX-License-Identifier: GPL-3.0

use crate::Error;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

// Historical baseline files store times as strings, newer ones as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ReferenceTime {
	Number(f64),
	Text(String),
}

/// Expected pallet execution times, keyed by pallet and extrinsic name.
/// Loaded once per run and read-only for the whole batch; per-pallet totals
/// are fixed at load time and never change across reruns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceBaseline {
	pallets: BTreeMap<String, PalletBaseline>,
}

/// The reference values of a single pallet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PalletBaseline {
	extrinsics: Vec<String>,
	total: f64,
}

impl ReferenceBaseline {
	/// Load reference values from a JSON file.
	///
	/// # Arguments
	/// * `path` - Path to the reference values file.
	pub fn from_path(path: &Path) -> Result<Self, Error> {
		Self::from_json(&fs::read_to_string(path)?)
	}

	/// Load reference values from a JSON document: an object keyed by pallet
	/// name, each value an object keyed by extrinsic name with a numeric
	/// (string or number) time value.
	pub fn from_json(json: &str) -> Result<Self, Error> {
		let raw: BTreeMap<String, BTreeMap<String, ReferenceTime>> = serde_json::from_str(json)?;
		let mut pallets = BTreeMap::new();
		for (pallet, times) in raw {
			let mut extrinsics = Vec::with_capacity(times.len());
			let mut total = 0.0;
			for (extrinsic, time) in times {
				total += match time {
					ReferenceTime::Number(time) => time,
					ReferenceTime::Text(text) =>
						text.trim().parse().map_err(|_| Error::InvalidBaseline {
							pallet: pallet.clone(),
							extrinsic: extrinsic.clone(),
							value: text.clone(),
						})?,
				};
				extrinsics.push(extrinsic);
			}
			pallets.insert(pallet, PalletBaseline { extrinsics, total });
		}
		Ok(Self { pallets })
	}

	/// The baseline of a single pallet.
	///
	/// # Arguments
	/// * `pallet` - Name of the pallet.
	pub fn pallet(&self, pallet: &str) -> Result<&PalletBaseline, Error> {
		self.pallets.get(pallet).ok_or_else(|| Error::MissingBaseline(pallet.to_string()))
	}

	/// Ensures every requested pallet has a baseline entry, so that a missing
	/// entry surfaces before any benchmark process is invoked.
	///
	/// # Arguments
	/// * `pallets` - Names of the requested pallets.
	pub fn ensure_pallets<S: AsRef<str>>(&self, pallets: &[S]) -> Result<(), Error> {
		for pallet in pallets {
			self.pallet(pallet.as_ref())?;
		}
		Ok(())
	}
}

impl PalletBaseline {
	/// Names of the extrinsics with recorded reference values.
	pub fn extrinsics(&self) -> &[String] {
		&self.extrinsics
	}

	/// Sum of all extrinsic reference times, in microseconds.
	pub fn total(&self) -> f64 {
		self.total
	}
}
