mod commands;
mod config;
mod diagnostics;
mod error;
mod freshness;
mod lines;
mod replacer;
mod report;
mod scanner;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::ScanFlags;

#[derive(Parser)]
#[command(name = "cyrscan", version, about = "Find Cyrillic text in a file and apply replacements")]
struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Compare a JSON report against the file without modifying anything
    Check {
        /// File the report was generated from
        input_file: PathBuf,
        /// Report to check (default: <input_stem>_en.json)
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Scan a file for Cyrillic text and write a report, or apply one with --replace
    Scan {
        /// File to analyze
        input_file: PathBuf,
        /// Report path (default: <input_stem>_en.txt, or .json with --json/--replace)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Capture everything between the first and last Cyrillic letter of each line
        #[arg(short, long)]
        all_line: bool,
        /// Write the report as JSON
        #[arg(short, long)]
        json: bool,
        /// Apply the `replace` fields of a JSON report to the input file
        #[arg(short, long)]
        replace: bool,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    return match cli.command {
        Commands::Check { input_file, report } => match commands::check(&input_file, report.as_deref()) {
            Ok(code) => code,
            Err(e) => {
                diagnostics::print_error(&e);
                ExitCode::FAILURE
            },
        },
        // Scan and replace errors print a diagnostic and still exit 0.
        Commands::Scan { input_file, output, all_line, json, replace } => {
            let flags = ScanFlags { all_line, json, replace };
            if let Err(e) = commands::scan(&input_file, output.as_deref(), flags) {
                diagnostics::print_error(&e);
            }
            ExitCode::SUCCESS
        },
    };
}

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`), so
/// stdout carries only command output.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_err| return EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
