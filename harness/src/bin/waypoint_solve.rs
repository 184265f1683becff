//! Solve one puzzle config and write its report directory.
//!
//! Usage: `waypoint-solve <config.json> [--out <dir>]`
//!
//! Prints the boards on the path, the step count and the digest on stdout.
//! Exit code 0 when solved, 1 when unreachable, 2 on error. Logs go to
//! stderr, filtered by `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use waypoint_harness::runner::{solve_to_dir, SolveOutcome};

#[derive(Debug, Parser)]
#[command(name = "waypoint-solve", about = "Solve a sliding-tile puzzle with A*")]
struct Args {
    /// JSON run config.
    config: PathBuf,
    /// Report directory (search_tree.json, path.json, digest.txt).
    #[arg(long, short, default_value = "waypoint-report")]
    out: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match solve_to_dir(&args.config, &args.out) {
        Ok(SolveOutcome::Solved(report)) => {
            for board in &report.path {
                println!("{board}");
            }
            println!("steps={}", report.steps);
            println!("digest={}", report.digest);
            ExitCode::SUCCESS
        }
        Ok(SolveOutcome::Unreachable(reason)) => {
            println!("unreachable ({reason:?})");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
