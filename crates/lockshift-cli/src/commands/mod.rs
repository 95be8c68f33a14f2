//! Command implementations.
//!
//! - [`convert`] - write the converted lockfile
//! - [`check`] - run the conversion and report statistics
//!
//! Both share [`pipeline`]: config → pnpm lockfile → manifest → conversion.

pub mod check;
pub mod convert;
pub mod pipeline;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use convert::execute as convert_execute;
