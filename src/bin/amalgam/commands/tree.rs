//! `amalgam tree` command

use anyhow::{anyhow, Result};

use crate::cli::TreeArgs;
use amalgam::core::{normalize_target, HeaderRepository, StructuralMarker};
use amalgam::ops::tree::{include_tree, render_tree};
use amalgam::util::GlobalContext;

pub fn execute(args: TreeArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config()?.amalgamate;

    let source_dir = ctx.project_path(&config.source_dir());
    let marker = StructuralMarker::new(config.marker());
    let repo = HeaderRepository::load(&source_dir, config.extension(), &marker)?;

    let entry = match args.entry.or(config.entry) {
        Some(entry) => normalize_target(&entry),
        None => repo.detect_entry()?.path().to_string(),
    };

    let tree = include_tree(&repo, &entry).ok_or_else(|| {
        anyhow!(
            "entry header `{}` not found in {}",
            entry,
            source_dir.display()
        )
    })?;

    print!(
        "{}",
        render_tree(&tree, args.depth.unwrap_or(usize::MAX), args.external)
    );

    Ok(())
}
