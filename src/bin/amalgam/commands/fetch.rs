//! `amalgam fetch` command

use anyhow::Result;

use crate::cli::FetchArgs;
use amalgam::ops::fetch::{fetch_files, FetchOptions};
use amalgam::util::shell::{Shell, Status};
use amalgam::util::GlobalContext;

pub fn execute(args: FetchArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config()?;

    let mut opts = FetchOptions::from_config(&config.fetch, ctx.project_root())?;
    if let Some(dest) = args.dest {
        opts.dest = ctx.cwd().join(dest);
    }

    if opts.files.is_empty() {
        shell.warn("no files configured under [fetch]");
        return Ok(());
    }

    let summary = fetch_files(&opts, shell)?;

    shell.status(
        Status::Finished,
        format!(
            "{} downloaded, {} already present in {}",
            summary.downloaded.len(),
            summary.skipped.len(),
            opts.dest.display()
        ),
    );

    Ok(())
}
