//! # terra
//!
//! Terra - Convention checks and screenshot management for Terra visual
//! regression suites.
//!
//! ## Name Origin
//!
//! **Terra** is the UI component library whose WebdriverIO helpers the specs
//! checked here are written with. The command line gives the linter and the
//! screenshot model one entry point.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terra")]
#[command(about = "Convention checks and screenshot management for Terra specs", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Terra spec files
    #[command(visible_alias = "patina")]
    Lint(commands::lint::LintArgs),

    /// List and manage reference screenshots
    #[command(visible_alias = "canon")]
    Screenshots(commands::screenshots::ScreenshotsArgs),

    /// Find the validation a screenshot belongs to
    Navigate(commands::navigate::NavigateArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Lint(args) => commands::lint::run(args),
        Commands::Screenshots(args) => commands::screenshots::run(args),
        Commands::Navigate(args) => commands::navigate::run(args),
    }
}
