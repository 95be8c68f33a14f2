//! Logging setup for the lockshift CLI.
//!
//! Library crates log through `tracing`; this module installs the subscriber.
//! `--verbose` turns on debug output for every `lockshift*` target,
//! `--quiet` limits output to errors, and otherwise `RUST_LOG` applies with
//! an info-level fallback.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "lockshift_cli=debug,lockshift_graph=debug,lockshift_lockfile=debug,lockshift_config=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str =
    "lockshift_cli=info,lockshift_graph=info,lockshift_lockfile=info,lockshift_config=info";

/// Initialize the tracing subscriber. Call once, before any logging.
///
/// `verbose` wins over `quiet` when both are set.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = filter_for(verbose, quiet);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    // a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
