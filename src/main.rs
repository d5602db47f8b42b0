mod domain;
mod masking;
mod storage;
mod user_store;

mod messages;
mod clients;
mod user_actor;

mod app_system;
mod config;
mod cli;

#[cfg(test)]
mod mock_framework;

use clap::Parser;
use std::process::ExitCode;

use crate::app_system::setup_tracing;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(cli::usage_exit_code(&e));
        }
    };

    // Setup tracing once for the entire application
    setup_tracing();

    cli::run(cli).await
}
