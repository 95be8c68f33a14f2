//! Command-line interface definition.
//!
//! - `lockshift convert` - write `package-lock.json` or `yarn.lock` next to `pnpm-lock.yaml`
//! - `lockshift check` - run the conversion without writing and report the tree shape

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{CheckArgs, Command, ConvertArgs};
pub use enums::*;
pub use validation::parse_registry;

/// lockshift - export pnpm lockfiles for npm and yarn
#[derive(Parser, Debug)]
#[command(
    name = "lockshift",
    version,
    about = "Export a pnpm lockfile as package-lock.json or yarn.lock",
    long_about = "lockshift reads pnpm-lock.yaml, rebuilds the dependency graph as the\n\
                  nested, hoisted tree npm would install, and writes it as a\n\
                  package-lock.json (v1) or yarn.lock (v1)."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
