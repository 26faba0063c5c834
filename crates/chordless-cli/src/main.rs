mod cli;
mod cmd;
mod error;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};
use clap::Parser;

use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(e) = dispatch(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Routes the parsed command to its implementation.
fn dispatch(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Cycles(args) => cmd::cycles::run(args, cli.format, cli.max_file_size),
        Command::Summary(args) => cmd::summary::run(args, cli.format, cli.max_file_size),
        Command::Order { graph, order } => {
            cmd::order::run(graph, order, cli.format, cli.max_file_size)
        }
    }
}
