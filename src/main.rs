mod classifier;
mod commands;
mod config;
mod diagnostics;
mod discovery;
mod error;
mod extractor;
mod logging;
mod report;
mod resolver;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::config::{Config, OutputFormat};

/// Exit code for fatal errors, distinct from "broken links found".
const EXIT_FATAL: u8 = 2;

/// Command-line arguments. Nothing is required; the repository is found through git.
#[derive(Parser)]
#[command(
    name = "doclinks",
    version,
    about = "Check that local links in tracked markdown files point at existing paths"
)]
struct Cli {
    /// Output format for the findings.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Repository root to check (default: the git repository containing the current directory).
    #[arg(long)]
    root: Option<PathBuf>,
    /// Log every scanned file and missing target to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = Config::load(cli.root.as_deref(), cli.format).and_then(|config| return commands::check(&config));
    match result {
        Ok(code) => return code,
        Err(e) => {
            diagnostics::print_error(&e);
            return ExitCode::from(EXIT_FATAL);
        },
    }
}
