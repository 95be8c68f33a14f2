//! Output lockfile schemas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lockfile format an export writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockSchema {
    #[default]
    #[serde(rename = "package-lock.json@v1")]
    PackageLockV1,
    #[serde(rename = "yarn.lock@v1")]
    YarnLockV1,
}

impl LockSchema {
    pub const ALL: [LockSchema; 2] = [LockSchema::PackageLockV1, LockSchema::YarnLockV1];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PackageLockV1 => "package-lock.json@v1",
            Self::YarnLockV1 => "yarn.lock@v1",
        }
    }

    /// File written into the project directory when no output path is given.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::PackageLockV1 => "package-lock.json",
            Self::YarnLockV1 => "yarn.lock",
        }
    }
}

impl fmt::Display for LockSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockSchema {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|schema| schema.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownSchema(s.to_string()))
    }
}
