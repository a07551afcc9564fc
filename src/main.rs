mod cli;
mod commands;
mod model;
mod reconcile;
mod util;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

const EXIT_CLEAN: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_MISMATCH: u8 = 2;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            error!(error = %err, "command failed");
            for cause in err.chain().skip(1) {
                error!(cause = %cause, "caused by");
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    let fail_on_mismatch = cli.command.source().fail_on_mismatch;

    let consistent = match cli.command {
        Commands::Check(args) => commands::check::run(args)?,
        Commands::Format(args) => commands::format::run(args)?,
    };

    let status = exit_status(consistent, fail_on_mismatch);
    if status == EXIT_MISMATCH {
        warn!("citations and references disagree; exiting with mismatch status");
    }
    Ok(status)
}

// A report that disagrees is still a successful run unless the caller opted in.
fn exit_status(consistent: bool, fail_on_mismatch: bool) -> u8 {
    if fail_on_mismatch && !consistent {
        EXIT_MISMATCH
    } else {
        EXIT_CLEAN
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
