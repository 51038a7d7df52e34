//! Compile-time benchmarking.
//!
//! Measures how long a compiler takes on a benchmark translation unit
//! under several sets of preprocessor defines. Every variant is measured
//! twice: once with `INCLUDE_ONLY` defined (the cost of parsing the
//! headers alone) and once without (the cost of also instantiating what
//! the benchmark uses).

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::util::config::{BenchConfig, BenchVariant};
use crate::util::process::{find_cxx_compiler, ProcessBuilder};
use crate::util::shell::{Shell, Status};

/// Define passed for the header-only measurement.
pub const INCLUDE_ONLY_DEFINE: &str = "INCLUDE_ONLY";

/// Options for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchOptions {
    /// Compiler executable
    pub compiler: PathBuf,

    /// Translation unit to compile
    pub source: PathBuf,

    /// Flags passed to every compilation
    pub flags: Vec<String>,

    /// Compilations per measurement
    pub iterations: u32,

    /// Variants to measure
    pub variants: Vec<BenchVariant>,
}

impl BenchOptions {
    /// Build options from configuration, resolving paths against `root`.
    pub fn from_config(config: &BenchConfig, root: &Path) -> Result<Self> {
        let compiler = match &config.compiler {
            Some(compiler) => compiler.clone(),
            None => find_cxx_compiler()
                .context("no C++ compiler found; set `compiler` under [bench] or $CXX")?,
        };

        let source = config
            .source
            .as_ref()
            .map(|s| root.join(s))
            .context("no benchmark source configured; set `source` under [bench]")?;

        if config.variants.is_empty() {
            bail!("no benchmark variants configured; add [[bench.variants]] entries");
        }

        Ok(BenchOptions {
            compiler,
            source,
            flags: config.flags.clone(),
            iterations: config.iterations(),
            variants: config.variants.clone(),
        })
    }
}

/// Timings for one variant, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantTiming {
    pub name: String,
    pub include_only: f64,
    pub full: f64,
}

/// Results of a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    pub compiler: String,
    pub iterations: u32,
    pub results: Vec<VariantTiming>,
}

/// Compile `iterations` times with `defines` and return the total time.
pub fn time_compilation(opts: &BenchOptions, defines: &[String], out_dir: &Path) -> Result<Duration> {
    let source_dir = opts
        .source
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let command = ProcessBuilder::new(&opts.compiler)
        .arg(&opts.source)
        .arg("-o")
        .arg(out_dir.join("bench-out"))
        .args(&opts.flags)
        .args(defines.iter().map(|d| format!("-D{}", d)))
        .cwd(source_dir);

    tracing::info!("Running: {}", command.display_command());

    let start = Instant::now();
    for _ in 0..opts.iterations {
        command
            .exec_and_check()
            .context("benchmark compilation failed")?;
    }
    Ok(start.elapsed())
}

/// Measure every variant in both modes.
pub fn run_benchmarks(opts: &BenchOptions, shell: &Shell) -> Result<BenchReport> {
    let out_dir = tempfile::TempDir::new().context("failed to create benchmark output directory")?;
    let progress = shell.progress(opts.variants.len() as u64 * 2, "Compiling");
    let mut results = Vec::with_capacity(opts.variants.len());

    for variant in &opts.variants {
        let mut include_only_defines = vec![INCLUDE_ONLY_DEFINE.to_string()];
        include_only_defines.extend(variant.defines.iter().cloned());

        shell.verbose(Status::Compiling, format!("{} (include only)", variant.name));
        let include_only = time_compilation(opts, &include_only_defines, out_dir.path())?;
        progress.inc(1);

        shell.verbose(Status::Compiling, &variant.name);
        let full = time_compilation(opts, &variant.defines, out_dir.path())?;
        progress.inc(1);

        results.push(VariantTiming {
            name: variant.name.clone(),
            include_only: include_only.as_secs_f64(),
            full: full.as_secs_f64(),
        });
    }
    progress.finish();

    Ok(BenchReport {
        compiler: opts.compiler.display().to_string(),
        iterations: opts.iterations,
        results,
    })
}

/// Describe how `first` compares to `second` ("2.5 times faster", "30% slower").
pub fn performance(first: f64, second: f64) -> String {
    if first > second {
        return performance(second, first).replace("faster", "slower");
    }
    if first <= 0.0 {
        return "not measurable".to_string();
    }

    let ratio = second / first;
    if ratio >= 2.0 {
        return format!("{:.1} times faster", ratio);
    }
    let percent = ((second - first) / first * 100.0).round();
    format!("{}% faster", percent)
}

/// Upper bound for a chart axis: 10% headroom, rounded up.
pub fn axis_max(values: &[f64]) -> u64 {
    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    (max * 1.1).ceil() as u64
}
