use crate::domain::model::{BuildRecord, BuildRecordIndex, DEFAULT_IDENTITY_FIELD};
use crate::domain::ports::{ConfigProvider, RecordSource};
use crate::utils::error::{CmpError, Result};
use serde_json::{Deserializer, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a stream of concatenated JSON objects and indexes them by identity field.
#[derive(Debug, Clone)]
pub struct LogLoader {
    identity_field: String,
}

impl LogLoader {
    pub fn new(identity_field: impl Into<String>) -> Self {
        Self {
            identity_field: identity_field.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.identity_field())
    }

    pub fn identity_field(&self) -> &str {
        &self.identity_field
    }

    pub fn load_file(&self, path: &Path) -> Result<BuildRecordIndex> {
        tracing::info!("📂 Loading build records from {}", path.display());

        let file = File::open(path).map_err(|source| CmpError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let index = self.load_from_reader(BufReader::new(file), path)?;
        tracing::info!(
            "✅ Indexed {} actions from {}",
            index.len(),
            path.display()
        );
        Ok(index)
    }

    /// `path` is only used to label errors and log lines.
    pub fn load_from_reader<R: Read>(&self, reader: R, path: &Path) -> Result<BuildRecordIndex> {
        let mut index = BuildRecordIndex::new();
        let stream = Deserializer::from_reader(reader).into_iter::<Value>();

        for (position, decoded) in stream.enumerate() {
            let record_no = position + 1;
            let value = decoded.map_err(|source| decode_error(path, source))?;

            let record = match value {
                Value::Object(data) => BuildRecord::new(data),
                other => {
                    return Err(CmpError::Schema {
                        path: path.to_path_buf(),
                        record: record_no,
                        reason: format!(
                            "expected a JSON object, found {}",
                            crate::domain::model::json_type_name(&other)
                        ),
                    })
                }
            };

            let key = record
                .identity(&self.identity_field)
                .map_err(|reason| CmpError::Schema {
                    path: path.to_path_buf(),
                    record: record_no,
                    reason,
                })?
                .to_string();

            if index.insert(key.clone(), record).is_some() {
                tracing::debug!(
                    "Record #{} in {} replaces an earlier action \"{}\"",
                    record_no,
                    path.display(),
                    key
                );
            }
        }

        Ok(index)
    }
}

impl Default for LogLoader {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_FIELD)
    }
}

impl RecordSource for LogLoader {
    fn load(&self, path: &Path) -> Result<BuildRecordIndex> {
        self.load_file(path)
    }
}

// 讀取中途的 I/O 失敗不算 JSON 格式錯誤
fn decode_error(path: &Path, source: serde_json::Error) -> CmpError {
    if source.is_io() {
        CmpError::Io {
            path: path.to_path_buf(),
            source: source.into(),
        }
    } else {
        CmpError::Parse {
            path: path.to_path_buf(),
            source,
        }
    }
}
