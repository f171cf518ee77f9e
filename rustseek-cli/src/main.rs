use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use rustseek::{run_search, ResultKind, SearchConfig, SearchSummary};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Finds files by name under a directory tree, one concurrent worker per
/// requested name.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search subdirectories recursively
    #[arg(short = 'R')]
    recursive: bool,

    /// Match names case-insensitively (ASCII folding)
    #[arg(short = 'i')]
    ignore_case: bool,

    /// Print a summary line after the result lines
    #[arg(long)]
    stats: bool,

    /// Log filter used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Directory to search in
    root: PathBuf,

    /// File names to search for, one worker each
    #[arg(required = true)]
    targets: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = SearchConfig {
        root_path: cli.root,
        targets: cli.targets,
        recursive: cli.recursive,
        case_sensitive: !cli.ignore_case,
        log_level: cli.log_level,
    };

    let summary = run_search(&config)?;
    print_results(&summary, cli.stats)?;
    Ok(summary.overall_success())
}

/// Stdout carries result lines only; logs and diagnostics go to stderr.
fn setup_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_results(summary: &SearchSummary, stats: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for message in &summary.messages {
        match message.kind() {
            ResultKind::Match | ResultKind::NotFound => {
                out.write_all(message.payload().as_bytes())?;
            }
            ResultKind::Error => eprint!("{}", message.payload().red()),
        }
    }
    out.flush()?;

    if stats {
        let walk = summary.walk_stats();
        println!(
            "Found {} of {} targets: {} matching files across {} directories",
            summary.targets_found,
            summary.outcomes.len(),
            summary.total_matches,
            walk.dirs_visited
        );
    }
    Ok(())
}
