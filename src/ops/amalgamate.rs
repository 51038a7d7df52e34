//! The amalgamation pipeline.
//!
//! Load → resolve → hoist → inject license → normalize → write. Every
//! stage is a pure text transform apart from the first and the last, and
//! the output file is only written once all of them have succeeded.

use std::path::{Path, PathBuf};

use crate::core::directive::normalize_target;
use crate::core::errors::AmalgamError;
use crate::core::header::HeaderRepository;
use crate::core::marker::StructuralMarker;
use crate::ops::format::{normalize, write_output};
use crate::ops::hoist::hoist_includes;
use crate::ops::license::inject_license;
use crate::ops::resolve::Resolver;
use crate::util::config::{AmalgamateConfig, DEFAULT_COMMENT, DEFAULT_EXTENSION};
use crate::util::fs::unix_newlines;

/// Options for an amalgamation run.
#[derive(Debug, Clone)]
pub struct AmalgamateOptions {
    /// Root of the header tree
    pub source_dir: PathBuf,

    /// Entry header relative to `source_dir` (auto-detected when `None`)
    pub entry: Option<String>,

    /// Directory the output is written to
    pub output_dir: PathBuf,

    /// License file
    pub license: PathBuf,

    /// Structural marker
    pub marker: StructuralMarker,

    /// Header extension
    pub extension: String,

    /// Line-comment token for the license banner
    pub comment: String,

    /// Keep quoted includes that name no header instead of failing
    pub allow_unresolved: bool,

    /// Run every stage but don't write the output
    pub dry_run: bool,
}

impl AmalgamateOptions {
    /// Create options with defaults for everything but the paths.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        license: impl Into<PathBuf>,
    ) -> Self {
        AmalgamateOptions {
            source_dir: source_dir.into(),
            entry: None,
            output_dir: output_dir.into(),
            license: license.into(),
            marker: StructuralMarker::default(),
            extension: DEFAULT_EXTENSION.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
            allow_unresolved: false,
            dry_run: false,
        }
    }

    /// Build options from configuration, resolving paths against `root`.
    pub fn from_config(config: &AmalgamateConfig, root: &Path) -> Self {
        AmalgamateOptions {
            source_dir: root.join(config.source_dir()),
            entry: config.entry.clone(),
            output_dir: root.join(config.output_dir()),
            license: root.join(config.license()),
            marker: StructuralMarker::new(config.marker()),
            extension: config.extension().to_string(),
            comment: config.comment().to_string(),
            allow_unresolved: config.allow_unresolved(),
            dry_run: false,
        }
    }

    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of an amalgamation run.
#[derive(Debug, Clone)]
pub struct AmalgamateResult {
    /// Entry header key
    pub entry: String,

    /// Where the output was (or would have been) written
    pub output_path: PathBuf,

    /// The final document
    pub contents: String,

    /// Headers inlined, in first-encountered order
    pub inlined: Vec<String>,

    /// Distinct external includes hoisted to the top
    pub external_includes: Vec<String>,

    /// Quoted includes kept because they name no header
    pub passthrough: Vec<String>,

    /// Number of headers in the source tree
    pub headers_loaded: usize,

    /// Whether the output file was written
    pub written: bool,
}

/// Run the full pipeline.
pub fn amalgamate(opts: &AmalgamateOptions) -> Result<AmalgamateResult, AmalgamError> {
    let repo = HeaderRepository::load(&opts.source_dir, &opts.extension, &opts.marker)?;

    let license = std::fs::read_to_string(&opts.license)
        .map(unix_newlines)
        .map_err(|source| AmalgamError::Read {
            path: opts.license.clone(),
            source,
        })?;

    let mut result = amalgamate_repository(&repo, &license, opts)?;

    if !opts.dry_run {
        write_output(&result.output_path, &result.contents)?;
        result.written = true;
        tracing::info!("wrote {}", result.output_path.display());
    }

    Ok(result)
}

/// Run the text stages against an already-loaded repository.
///
/// Nothing is written; `written` is always `false` in the result.
pub fn amalgamate_repository(
    repo: &HeaderRepository,
    license: &str,
    opts: &AmalgamateOptions,
) -> Result<AmalgamateResult, AmalgamError> {
    let entry = match &opts.entry {
        Some(entry) => {
            let key = normalize_target(entry);
            repo.get(&key).ok_or_else(|| AmalgamError::EntryPoint {
                message: format!(
                    "entry header `{}` not found in {}",
                    entry,
                    repo.root().display()
                ),
                candidates: Vec::new(),
            })?
        }
        None => repo.detect_entry()?,
    };
    tracing::info!("amalgamating `{}`", entry.path());

    let resolution = Resolver::new(repo)
        .allow_unresolved(opts.allow_unresolved)
        .with_entry(entry.path())
        .resolve(entry.content())?;
    tracing::info!("inlined {} headers", resolution.inlined.len());

    let hoisted = hoist_includes(&resolution.text, &opts.marker);
    let licensed = inject_license(&hoisted.text, license, &opts.marker, &opts.comment);
    let contents = normalize(&licensed).into_owned();

    let file_name = Path::new(entry.path())
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(entry.path()));

    Ok(AmalgamateResult {
        entry: entry.path().to_string(),
        output_path: opts.output_dir.join(file_name),
        contents,
        inlined: resolution.inlined,
        external_includes: hoisted.includes,
        passthrough: resolution.passthrough,
        headers_loaded: repo.len(),
        written: false,
    })
}
