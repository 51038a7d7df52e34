//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use amalgam::util::shell::ColorChoice;

/// Amalgam - flatten a tree of C/C++ headers into a single header
#[derive(Parser)]
#[command(name = "amalgam")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Defaults to `build` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the single-header version of the header tree
    Build(BuildArgs),

    /// Display the include tree of the entry header
    Tree(TreeArgs),

    /// Measure compile times of the benchmark variants
    Bench(BenchArgs),

    /// Download the configured third-party headers
    Fetch(FetchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Default)]
pub struct BuildArgs {
    /// Entry header, relative to the source directory
    #[arg(long)]
    pub entry: Option<String>,

    /// Header tree root (overrides Amalgam.toml)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Output directory (overrides Amalgam.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run every stage without writing the output
    #[arg(long)]
    pub dry_run: bool,

    /// Keep quoted includes that name no header as external includes
    #[arg(long)]
    pub allow_unresolved: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Entry header, relative to the source directory
    #[arg(long)]
    pub entry: Option<String>,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Also list external includes
    #[arg(long)]
    pub external: bool,
}

#[derive(Args)]
pub struct BenchArgs {
    /// Compilations per measurement (overrides Amalgam.toml)
    #[arg(short, long)]
    pub iterations: Option<u32>,

    /// Print results as JSON instead of rendering the report
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Destination directory (overrides Amalgam.toml)
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: CompletionShell,
}
