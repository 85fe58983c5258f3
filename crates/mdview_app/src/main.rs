//! `mdview`: resolve a Markdown document from a query, a base64 payload or a
//! local file and write it out as a single HTML page.
mod cli;
mod config;
mod run;

use std::process::ExitCode;

use clap::Parser;
use mdview_core::LoadPhase;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli.init_logging();
    let phase = run::run(&cli)?;
    // The page is written either way; a failed load still exits non-zero.
    Ok(if phase == LoadPhase::Errored {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}
