use crate::domain::model::{BuildRecordIndex, ExclusionSet};
use crate::utils::error::Result;
use std::path::Path;

/// Anything that can turn a log location into an index of build records.
pub trait RecordSource {
    fn load(&self, path: &Path) -> Result<BuildRecordIndex>;
}

pub trait ConfigProvider {
    fn identity_field(&self) -> &str;
    fn excluded_fields(&self) -> &ExclusionSet;
}
