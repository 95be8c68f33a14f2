//! lockshift CLI entry point: argument parsing, logging setup and command dispatch.

use clap::Parser;
use lockshift_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init(args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Convert(convert_args) => commands::convert_execute(convert_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
    };

    result.map_err(error::cli_error_to_miette)
}
