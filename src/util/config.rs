//! Configuration file support for amalgam.
//!
//! Two configuration file locations are read:
//! - Global: `~/.amalgam/config.toml` - User-wide defaults
//! - Project: `Amalgam.toml` at the project root - Project-specific settings
//!
//! Project config takes precedence over global config, field by field.
//! Every setting is optional; a project without `Amalgam.toml` runs with
//! the defaults below.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::marker::DEFAULT_MARKER;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "Amalgam.toml";

/// Default directory holding the header tree.
pub const DEFAULT_SOURCE_DIR: &str = "includes";

/// Default directory receiving the amalgamated header.
pub const DEFAULT_OUTPUT_DIR: &str = "public";

/// Default license file, relative to the project root.
pub const DEFAULT_LICENSE: &str = "LICENSE";

/// Default header extension.
pub const DEFAULT_EXTENSION: &str = "hpp";

/// Default line-comment token used for the license banner.
pub const DEFAULT_COMMENT: &str = "//";

/// Default number of compilations per benchmark measurement.
pub const DEFAULT_BENCH_ITERATIONS: u32 = 10;

/// Amalgam configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Amalgamation settings
    pub amalgamate: AmalgamateConfig,

    /// Compile-time benchmark settings
    pub bench: BenchConfig,

    /// Third-party header download settings
    pub fetch: FetchConfig,
}

/// Settings for the amalgamation pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmalgamateConfig {
    /// Root of the header tree
    pub source_dir: Option<PathBuf>,

    /// Entry header, relative to `source_dir` (auto-detected when unset)
    pub entry: Option<String>,

    /// Directory the amalgamated header is written to
    pub output_dir: Option<PathBuf>,

    /// License file injected as a comment banner
    pub license: Option<PathBuf>,

    /// Structural marker line
    pub marker: Option<String>,

    /// Header file extension
    pub extension: Option<String>,

    /// Line-comment token for the license banner
    pub comment: Option<String>,

    /// Pass quoted includes that name no header through as external includes
    pub allow_unresolved: Option<bool>,
}

impl AmalgamateConfig {
    pub fn source_dir(&self) -> PathBuf {
        self.source_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn license(&self) -> PathBuf {
        self.license
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LICENSE))
    }

    pub fn marker(&self) -> &str {
        self.marker.as_deref().unwrap_or(DEFAULT_MARKER)
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    pub fn comment(&self) -> &str {
        self.comment.as_deref().unwrap_or(DEFAULT_COMMENT)
    }

    pub fn allow_unresolved(&self) -> bool {
        self.allow_unresolved.unwrap_or(false)
    }

    fn merge(&mut self, other: AmalgamateConfig) {
        if other.source_dir.is_some() {
            self.source_dir = other.source_dir;
        }
        if other.entry.is_some() {
            self.entry = other.entry;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.license.is_some() {
            self.license = other.license;
        }
        if other.marker.is_some() {
            self.marker = other.marker;
        }
        if other.extension.is_some() {
            self.extension = other.extension;
        }
        if other.comment.is_some() {
            self.comment = other.comment;
        }
        if other.allow_unresolved.is_some() {
            self.allow_unresolved = other.allow_unresolved;
        }
    }
}

/// Compile-time benchmark configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// C++ compiler (defaults to $CXX, then g++/clang++/c++ on PATH)
    pub compiler: Option<PathBuf>,

    /// Translation unit compiled for every measurement
    pub source: Option<PathBuf>,

    /// Compiler flags shared by every measurement
    pub flags: Vec<String>,

    /// Compilations per measurement
    pub iterations: Option<u32>,

    /// Report template with `__PLACEHOLDER__` tokens
    pub template: Option<PathBuf>,

    /// Rendered report path
    pub output: Option<PathBuf>,

    /// Benchmarked variants, first one is the baseline for comparisons
    pub variants: Vec<BenchVariant>,
}

/// A named set of preprocessor defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchVariant {
    pub name: String,

    #[serde(default)]
    pub defines: Vec<String>,
}

impl BenchConfig {
    pub fn iterations(&self) -> u32 {
        self.iterations.unwrap_or(DEFAULT_BENCH_ITERATIONS)
    }

    fn merge(&mut self, other: BenchConfig) {
        if other.compiler.is_some() {
            self.compiler = other.compiler;
        }
        if other.source.is_some() {
            self.source = other.source;
        }
        if !other.flags.is_empty() {
            self.flags = other.flags;
        }
        if other.iterations.is_some() {
            self.iterations = other.iterations;
        }
        if other.template.is_some() {
            self.template = other.template;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
        if !other.variants.is_empty() {
            self.variants = other.variants;
        }
    }
}

/// Third-party file download configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// URL the file names are joined onto
    pub base_url: Option<String>,

    /// Destination directory
    pub dest: Option<PathBuf>,

    /// File names to download
    pub files: Vec<String>,

    /// Expected sha256 per file name
    pub checksums: BTreeMap<String, String>,
}

impl FetchConfig {
    fn merge(&mut self, other: FetchConfig) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.dest.is_some() {
            self.dest = other.dest;
        }
        if !other.files.is_empty() {
            self.files = other.files;
        }
        self.checksums.extend(other.checksums);
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.amalgamate.merge(other.amalgamate);
        self.bench.merge(other.bench);
        self.fetch.merge(other.fetch);
    }
}

/// Load merged configuration from global and project locations.
///
/// A broken global config only produces a warning; a broken project
/// config is an error since it describes the run itself.
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load(project_path)?);
    }

    Ok(config)
}
