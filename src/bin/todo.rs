//! todo CLI binary.

#![deny(missing_docs)]

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::warn;

use todo::cli;
use todo::config::Config;
use todo::dispatch::Dispatcher;
use todo::error::TodoResult;
use todo::logging;
use todo::report::Printer;
use todo::store::Locations;

fn main() -> TodoResult<ExitCode> {
    let args = cli::Cli::parse();
    logging::init(args.verbose, args.quiet);

    let locations = Locations::from_env();
    let config = match &locations.home {
        Some(home) => Config::load_or_default(home).unwrap_or_else(|e| {
            warn!(error = ?e, "ignoring config");
            Config::default()
        }),
        None => Config::default(),
    };
    if !config.color {
        colored::control::set_override(false);
    }

    let session = Dispatcher::new(&locations, &config).run(args.tokens);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    Printer::new(config.missing_store).session(&session, &mut out)?;
    out.flush()?;

    if config.exit_codes && session.failed() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
