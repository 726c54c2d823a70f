// SPDX-License-Identifier: GPL-3.0

use crate::Error;
use git2::{FetchOptions, build::RepoBuilder};
use std::path::Path;
use url::Url;

/// Clone a Git repository into the target directory.
///
/// # Arguments
/// * `url` - the URL of the repository to clone.
/// * `working_dir` - the target working directory.
pub fn clone(url: &str, working_dir: &Path) -> Result<(), Error> {
	let url = Url::parse(url)?;
	log::debug!("cloning `{url}` into {}", working_dir.display());
	let mut fetch_options = FetchOptions::new();
	fetch_options.depth(1);
	let mut repo = RepoBuilder::new();
	repo.fetch_options(fetch_options);
	repo.clone(url.as_str(), working_dir)?;
	Ok(())
}
