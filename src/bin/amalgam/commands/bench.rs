//! `amalgam bench` command

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::BenchArgs;
use amalgam::ops::bench::{run_benchmarks, BenchOptions};
use amalgam::ops::report::render_report;
use amalgam::util::shell::{Shell, Status};
use amalgam::util::GlobalContext;

pub fn execute(args: BenchArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config()?;

    let mut opts = BenchOptions::from_config(&config.bench, ctx.project_root())?;
    if let Some(iterations) = args.iterations {
        opts.iterations = iterations;
    }

    let report = run_benchmarks(&opts, shell)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for result in &report.results {
        shell.status(
            Status::Finished,
            format!(
                "{}: {:.2}s include only, {:.2}s full ({} iterations)",
                result.name, result.include_only, result.full, report.iterations
            ),
        );
    }

    if let Some(template) = &config.bench.template {
        let template = ctx.project_path(template);
        let output = match &config.bench.output {
            Some(output) => ctx.project_path(output),
            None => default_report_path(&template),
        };
        render_report(&template, &output, &report)?;
        shell.status(Status::Created, format!("report at {}", output.display()));
    }

    Ok(())
}

/// `results.md.template` renders to `results.md` next to it.
fn default_report_path(template: &Path) -> PathBuf {
    match template.extension().and_then(|e| e.to_str()) {
        Some("template") => template.with_extension(""),
        _ => template.with_extension("md"),
    }
}
