//! Formula Check CLI
//!
//! Compiles every formula file in a directory and reports, per file, whether
//! the compiler hit an internal error and whether the formula has errors.
//!
//! Usage: `formula-check <dir> [--domain shader|geometry] [--emit none|ops|json]`

use clap::{Parser, ValueEnum};
use formula_tools::{Domain, check_directory};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};

/// What to print for files that compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Emit {
    /// Status lines only
    #[default]
    None,
    /// One operation per line
    Ops,
    /// Operations as a JSON array
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "formula-check")]
#[command(about = "Compile formula files and report diagnostics")]
struct Args {
    /// Directory containing formula files
    dir: PathBuf,

    /// Node tree kind to compile for
    #[arg(long, value_enum, default_value_t = Domain::Shader)]
    domain: Domain,

    /// Output for files that compiled
    #[arg(long, value_enum, default_value_t = Emit::None)]
    emit: Emit,

    /// Also print diagnostics of files with errors
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    formula_tools::init_logging();

    let args = Args::parse();

    info!("Checking formulas in: {}", args.dir.display());

    let summary = match check_directory(&args.dir, args.domain) {
        Ok(summary) => summary,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };

    for report in &summary.reports {
        println!("{report}");

        if !report.diagnostics.is_empty()
            && (args.verbose || report.is_fatal() || report.is_unreadable())
        {
            println!("{}", report.diagnostics);
        }

        let Some(compilation) = report.compilation() else {
            continue;
        };
        if !compilation.succeeded() {
            continue;
        }
        match args.emit {
            Emit::None => {}
            Emit::Ops => {
                for operation in &compilation.operations {
                    println!("    {operation}");
                }
            }
            Emit::Json => match serde_json::to_string_pretty(&compilation.operations) {
                Ok(json) => println!("{json}"),
                Err(err) => warn!("Failed to serialize operations: {err}"),
            },
        }
    }

    info!(
        "{} files, {} clean, {} with internal errors, {} unreadable",
        summary.reports.len(),
        summary.clean_count(),
        summary.fatal_count(),
        summary.unreadable_count()
    );

    if summary.has_fatal() || summary.unreadable_count() > 0 {
        process::exit(1);
    }
}
