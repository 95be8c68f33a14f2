use clap::ValueEnum;
use lockshift_config::LockSchema;

/// Output lockfile schema
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum SchemaArg {
    /// npm package-lock.json, lockfileVersion 1
    #[value(name = "package-lock.json@v1")]
    PackageLockV1,

    /// Classic yarn.lock
    #[value(name = "yarn.lock@v1")]
    YarnLockV1,
}

impl From<SchemaArg> for LockSchema {
    fn from(value: SchemaArg) -> Self {
        match value {
            SchemaArg::PackageLockV1 => LockSchema::PackageLockV1,
            SchemaArg::YarnLockV1 => LockSchema::YarnLockV1,
        }
    }
}
