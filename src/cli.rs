//! CLI argument parser for todo.

#![deny(missing_docs)]

use clap::Parser;

/// Keep a todo list in a flat file, per directory or per user.
#[derive(Parser, Debug)]
#[command(
    name = "todo",
    version,
    about = "Keep a todo list in a flat file, per directory or per user",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Set diagnostic verbosity on stderr: -v=1, -v=2, -v=3
    #[arg(
        short = 'v',
        long = "verbose",
        value_name = "LEVEL",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=3)
    )]
    pub verbose: u8,

    /// Silence all diagnostics (overrides -v).
    #[arg(short, long)]
    pub quiet: bool,

    /// Commands, e.g. `add buy milk`, `global complete 2`. None lists the local todos.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}
