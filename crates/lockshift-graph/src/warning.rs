//! Non-fatal diagnostics collected during a conversion.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Warning {
    /// The lockfile declares a schema newer than the latest one tested.
    UnsupportedLockVersion { found: String, supported: String },
    /// The project manifest lacked a field; a placeholder was written instead.
    MissingProjectMetadata {
        field: &'static str,
        placeholder: &'static str,
    },
    /// A peer dependency does not resolve to the version pnpm recorded.
    UnsatisfiedPeer { package: String, peer: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLockVersion { found, supported } => write!(
                f,
                "lockfile version {found} is newer than the latest supported version {supported}; output may be incomplete"
            ),
            Self::MissingProjectMetadata { field, placeholder } => write!(
                f,
                "project has no \"{field}\" field; using \"{placeholder}\""
            ),
            Self::UnsatisfiedPeer { package, peer } => write!(
                f,
                "peer dependency \"{peer}\" of \"{package}\" does not resolve to the locked version; left out of requires"
            ),
        }
    }
}
