//! lockshift CLI - export a pnpm lockfile as `package-lock.json` or `yarn.lock`.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions for `lockshift convert` and `lockshift check`
//! - `commands` - the load → convert → render pipeline behind each subcommand
//! - [`error`] - `CliError` and its miette rendering
//! - [`logger`] - tracing subscriber setup driven by `--verbose`/`--quiet`
//! - [`ui`] - colored status lines and the tree summary
//!
//! # Example
//!
//! ```rust,no_run
//! use lockshift_cli::{cli::CheckArgs, commands, logger};
//!
//! fn main() -> lockshift_cli::Result<()> {
//!     logger::init_logger(false, false, false);
//!     commands::check_execute(CheckArgs {
//!         dir: ".".into(),
//!         config: None,
//!     })
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
