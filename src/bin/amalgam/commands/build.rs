//! `amalgam build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use amalgam::ops::amalgamate::{amalgamate, AmalgamateOptions};
use amalgam::util::diagnostic::{self, Diagnostic};
use amalgam::util::shell::{Shell, Status};
use amalgam::util::GlobalContext;

pub fn execute(args: BuildArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config()?;

    // CLI overrides config; CLI paths are relative to the working directory
    let mut opts = AmalgamateOptions::from_config(&config.amalgamate, ctx.project_root())
        .with_dry_run(args.dry_run);
    if let Some(entry) = args.entry {
        opts.entry = Some(entry);
    }
    if let Some(source) = args.source {
        opts.source_dir = ctx.cwd().join(source);
    }
    if let Some(output) = args.output {
        opts.output_dir = ctx.cwd().join(output);
    }
    opts.allow_unresolved |= args.allow_unresolved;

    shell.status(
        Status::Resolving,
        format!("headers in {}", opts.source_dir.display()),
    );

    let result = amalgamate(&opts)?;

    if !shell.is_quiet() {
        for target in &result.passthrough {
            let warning = Diagnostic::warning(format!(
                "`{}` does not name a header in the source tree",
                target
            ))
            .with_context("kept as an external include");
            diagnostic::emit(&warning, shell.use_color());
        }
    }

    shell.verbose(
        Status::Info,
        format!(
            "inlined {} of {} headers, hoisted {} external includes ({} unresolved)",
            result.inlined.len(),
            result.headers_loaded,
            result.external_includes.len(),
            result.passthrough.len()
        ),
    );

    if result.written {
        shell.status(
            Status::Created,
            format!(
                "header-only version of `{}` at {}",
                result.entry,
                result.output_path.display()
            ),
        );
    } else {
        shell.status(
            Status::Finished,
            format!(
                "dry run: would write {} bytes to {} ({} headers inlined, {} external includes)",
                result.contents.len(),
                result.output_path.display(),
                result.inlined.len(),
                result.external_includes.len()
            ),
        );
    }

    Ok(())
}
