//! CLI entry point for the backtracking road tile solver

use clap::Parser;
use roadtiles::algorithm::solver::SolveOutcome;
use roadtiles::io::cli::{Cli, SolveRunner};
use std::process::ExitCode;

fn main() -> roadtiles::Result<ExitCode> {
    let cli = Cli::parse();
    let mut runner = SolveRunner::new(cli);
    runner.install_logger()?;
    match runner.run()? {
        SolveOutcome::Solved => Ok(ExitCode::SUCCESS),
        SolveOutcome::Failed | SolveOutcome::Incomplete => Ok(ExitCode::from(2)),
    }
}
