//! Entry point for the `language-sync` command.

use std::io::{
    self,
    Write,
};
use std::process::ExitCode;

use clap::Parser;
use language_sync::cli::{
    self,
    Args,
    CliError,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let result = std::env::current_dir().map_err(CliError::from).and_then(|working_dir| {
        cli::run(&args, &working_dir, &mut io::stdin().lock(), &mut io::stdout().lock())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "Sync aborted");
            // stderr が閉じている場合は何もできない
            let _ = writeln!(io::stderr(), "{error}");
            ExitCode::FAILURE
        }
    }
}
