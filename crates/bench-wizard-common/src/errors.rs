// SPDX-License-Identifier: GPL-3.0

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("a git error occurred: {0}")]
	Git(#[from] git2::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("ParseError error: {0}")]
	ParseError(#[from] url::ParseError),
}
