//! Miette rendering for CLI errors.

use lockshift_graph::ConvertError;
use lockshift_lockfile::LockfileError;
use miette::Report;

use crate::error::CliError;

/// Convert a `CliError` into a miette report with a hint where one helps.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Lockfile(LockfileError::LockfileNotFound(dir)) => miette::miette!(
            help = "Run `pnpm install` first or pass --dir <project>",
            "pnpm lockfile not found in {}",
            dir.display()
        ),
        CliError::Lockfile(LockfileError::Convert(e)) | CliError::Convert(e) => {
            convert_error_to_miette(e)
        }
        other => miette::miette!("{}", other),
    }
}

fn convert_error_to_miette(err: ConvertError) -> Report {
    match err {
        ConvertError::UnrepresentableCycle { chain } => miette::miette!(
            help = "The cycle has no finite nested form; npm cannot install it either",
            "Dependency cycle cannot be nested:\n  {}",
            chain.join("\n  > ")
        ),
        ConvertError::ResolutionViolation { .. } => miette::miette!(
            help = "Please report this lockfile; the hoisted tree failed verification",
            "{}",
            err
        ),
        other => miette::miette!(help = "Is pnpm-lock.yaml complete?", "{}", other),
    }
}
