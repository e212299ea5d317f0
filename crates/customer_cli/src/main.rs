//! Customer demo entry point.
//!
//! # Responsibility
//! - Load configuration, start logging and open the document store.
//! - Run the one-shot customer demo and map its outcome to an exit code.
//!
//! # Invariants
//! - Exit code is 0 on success and 1 on any failure, configuration included.

mod args;

use args::Cli;
use clap::error::ErrorKind;
use clap::Parser;
use customer_core::{core_version, init_logging, open_store, DemoRunner, SqliteCustomerRepository};
use log::{error, info};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&cli.log_level, cli.log_dir.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    info!(
        "event=store_connect module=cli status=start uri={} core_version={}",
        cli.store_uri,
        core_version()
    );
    let conn = open_store(&cli.store_uri)?;

    let mut runner = DemoRunner::new(SqliteCustomerRepository::new(&conn));
    let report = runner.run()?;

    info!(
        "event=app_exit module=cli status=ok stage={} customers={}",
        runner.stage(),
        report.all.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::args::Cli;
    use customer_core::StoreUri;

    fn cli_for(store_uri: StoreUri) -> Cli {
        Cli {
            store_uri,
            log_level: "debug".to_string(),
            log_dir: None,
        }
    }

    #[test]
    fn run_succeeds_against_memory_store() {
        run(&cli_for(StoreUri::Memory)).expect("memory store run should succeed");
    }

    #[test]
    fn run_persists_seed_to_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.sqlite3");

        run(&cli_for(StoreUri::File(path.clone()))).unwrap();
        run(&cli_for(StoreUri::File(path.clone()))).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn run_fails_when_store_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("customers.sqlite3");

        let err = run(&cli_for(StoreUri::File(path))).unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
