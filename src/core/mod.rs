pub mod differ;
pub mod engine;
pub mod loader;

pub use crate::domain::model::{BuildRecord, BuildRecordIndex, ExclusionSet, RecordDiff};
pub use crate::domain::ports::{ConfigProvider, RecordSource};
pub use crate::utils::error::Result;
