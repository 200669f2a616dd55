pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::CompareSettings;
pub use crate::core::{differ::RecordDiffer, engine::CompareEngine, loader::LogLoader};
pub use domain::model::{
    BuildRecord, BuildRecordIndex, Difference, DifferenceKind, ExclusionSet, RecordDiff,
};
pub use utils::error::{CmpError, Result};
