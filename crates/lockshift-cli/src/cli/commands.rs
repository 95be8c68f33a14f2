use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::enums::SchemaArg;
use super::validation::parse_registry;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert pnpm-lock.yaml into another lockfile format
    ///
    /// Reads pnpm-lock.yaml and package.json from the project directory and
    /// writes the converted lockfile there unless --output or --stdout is given.
    Convert(ConvertArgs),

    /// Run the conversion without writing anything
    ///
    /// Reports package count, tree depth, hoisting statistics and warnings.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Project directory containing pnpm-lock.yaml
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Output lockfile schema
    ///
    /// Defaults to package-lock.json@v1, or the value from lockshift.config.json.
    #[arg(short, long, value_enum)]
    pub schema: Option<SchemaArg>,

    /// Write to this file instead of the schema's default file name
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the lockfile to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Registry used for tarball URLs pnpm did not record
    #[arg(long, value_name = "URL", value_parser = parse_registry)]
    pub registry: Option<String>,

    /// Path to lockshift.config.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project directory containing pnpm-lock.yaml
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Path to lockshift.config.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
