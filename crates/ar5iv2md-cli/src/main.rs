use ar5iv2md_core::{logging, Error};
use clap::Parser;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    match &cli.log_file {
        Some(path) => {
            if let Err(e) = logging::init_file_logging(path, cli.verbose) {
                logging::init_stderr_logging(cli.verbose);
                tracing::warn!("cannot log to {}: {}; using stderr", path.display(), e);
            }
        }
        None => logging::init_stderr_logging(cli.verbose),
    }

    if let Err(err) = cli.run() {
        eprintln!("ar5iv2md error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<Error>().map_or(1, Error::exit_code)
}
