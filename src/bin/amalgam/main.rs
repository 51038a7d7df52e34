//! Amalgam CLI - flatten a header tree into a single header

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use amalgam::util::diagnostic;
use amalgam::util::Shell;
use amalgam::AmalgamError;
use cli::{BuildArgs, Cli, Commands};

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.quiet {
        EnvFilter::new("amalgam=error")
    } else if cli.verbose {
        EnvFilter::new("amalgam=debug")
    } else {
        EnvFilter::new("amalgam=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    if let Err(e) = run(cli, &shell) {
        match e.downcast_ref::<AmalgamError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), shell.use_color()),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, shell: &Shell) -> Result<()> {
    match cli.command.unwrap_or_else(|| Commands::Build(BuildArgs::default())) {
        Commands::Build(args) => commands::build::execute(args, shell),
        Commands::Tree(args) => commands::tree::execute(args),
        Commands::Bench(args) => commands::bench::execute(args, shell),
        Commands::Fetch(args) => commands::fetch::execute(args, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
