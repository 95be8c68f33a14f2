//! Fatal conversion errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("malformed dependency identifier: name: \"{name}\", identifier: \"{identifier}\" ({reason})")]
    MalformedIdentifier {
        name: String,
        identifier: String,
        reason: String,
    },

    #[error("package not found in snapshots: name: \"{name}\", identifier: \"{identifier}\"")]
    SnapshotNotFound { name: String, identifier: String },

    #[error("dependency cycle cannot be represented as a nested tree: {}", chain.join(" -> "))]
    UnrepresentableCycle { chain: Vec<String> },

    #[error(
        "\"{path}\" requires {dependency}@{expected} but resolves {}",
        found.as_deref().map_or_else(|| "nothing".to_string(), |v| format!("{dependency}@{v}"))
    )]
    ResolutionViolation {
        path: String,
        dependency: String,
        expected: String,
        found: Option<String>,
    },
}
