//! Third-party header downloads.
//!
//! Fetches a fixed list of files from a base URL into a local directory,
//! typically competing header-only libraries used by the benchmark.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use url::Url;

use crate::util::config::FetchConfig;
use crate::util::fs::{ensure_dir, relative_slash_path};
use crate::util::hash::verify_sha256;
use crate::util::shell::{Shell, Status};

/// Options for a fetch run.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Base URL; file names are resolved relative to it
    pub base_url: Url,

    /// Destination directory
    pub dest: PathBuf,

    /// File names to download
    pub files: Vec<String>,

    /// Expected sha256 per file name
    pub checksums: BTreeMap<String, String>,
}

impl FetchOptions {
    /// Build options from configuration, resolving `dest` against `root`.
    pub fn from_config(config: &FetchConfig, root: &Path) -> Result<Self> {
        let base = config
            .base_url
            .as_deref()
            .context("no download URL configured; set `base_url` under [fetch]")?;
        let base_url = parse_base_url(base)?;

        let dest = config
            .dest
            .as_ref()
            .map(|d| root.join(d))
            .context("no download directory configured; set `dest` under [fetch]")?;

        Ok(FetchOptions {
            base_url,
            dest,
            files: config.files.clone(),
            checksums: config.checksums.clone(),
        })
    }
}

/// Summary of a fetch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Parse a base URL, making sure it is treated as a directory.
pub fn parse_base_url(base: &str) -> Result<Url> {
    let with_slash = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    Url::parse(&with_slash).with_context(|| format!("invalid base URL: {}", base))
}

/// URL of `file` below `base`.
pub fn file_url(base: &Url, file: &str) -> Result<Url> {
    if file.starts_with('/') || file.contains("://") {
        bail!("file name must be relative to the base URL: {}", file);
    }
    base.join(file)
        .with_context(|| format!("invalid file name for download: {}", file))
}

/// Download every file that is not already present in `dest`.
pub fn fetch_files(opts: &FetchOptions, shell: &Shell) -> Result<FetchSummary> {
    ensure_dir(&opts.dest)?;

    let mut summary = FetchSummary::default();
    let progress = shell.progress(opts.files.len() as u64, "Fetching");

    for file in &opts.files {
        let target = opts.dest.join(file);
        if relative_slash_path(&opts.dest, &target).is_none() {
            bail!("refusing to write outside {}: {}", opts.dest.display(), file);
        }

        if target.exists() {
            shell.verbose(Status::Skipped, format!("{} (already present)", file));
            summary.skipped.push(target);
            progress.inc(1);
            continue;
        }

        let url = file_url(&opts.base_url, file)?;
        shell.verbose(Status::Fetching, &url);
        let bytes = download(&url)?;

        if let Some(expected) = opts.checksums.get(file) {
            verify_sha256(file, &bytes, expected)?;
        }

        if let Some(parent) = target.parent() {
            ensure_dir(parent)?;
        }
        std::fs::write(&target, &bytes)
            .with_context(|| format!("failed to write {}", target.display()))?;

        shell.status(Status::Downloaded, format!("{} to {}", file, target.display()));
        summary.downloaded.push(target);
        progress.inc(1);
    }
    progress.finish();

    Ok(summary)
}

fn download(url: &Url) -> Result<Vec<u8>> {
    tracing::info!("Downloading {}", url);

    let response = reqwest::blocking::get(url.as_str())
        .with_context(|| format!("failed to download {}", url))?;

    if !response.status().is_success() {
        bail!("failed to download {}: HTTP {}", url, response.status());
    }

    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read response body from {}", url))?;

    Ok(bytes.to_vec())
}
