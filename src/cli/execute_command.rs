use crate::cli::{Cli, Commands};
use crate::storage_engine::{Record, RecordStore, StoreConfig};
use std::error::Error;

/// Executes a parsed CLI command against the default backing file.
///
/// Prints a success line to stdout, or the error chain and a failure line to
/// stderr and exits with status 1. Argument errors never reach this point;
/// clap reports them before anything touches the file.
pub fn execute_command(cli: &Cli) {
    let store = RecordStore::open(StoreConfig::default());

    match &cli.command {
        Commands::Read { index } => match store.read_record(*index) {
            Ok(record) => {
                println!("Read success! {}", record);
            }
            Err(err) => {
                report(&err);
                eprintln!("Read failed!");
                std::process::exit(1);
            }
        },

        Commands::Write { index, key, value } => {
            let record = Record::from_strs(key, value);

            match store.write_record(*index, &record) {
                Ok(()) => {
                    println!("Write success!");
                }
                Err(err) => {
                    report(&err);
                    eprintln!("Write failed!");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn report(err: &dyn Error) {
    eprintln!("Error: {}", err);

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
