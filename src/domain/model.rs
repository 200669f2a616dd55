use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// 預設的識別欄位
pub const DEFAULT_IDENTITY_FIELD: &str = "progressMessage";

/// 每次執行都會變動、比對時忽略的欄位
pub const DEFAULT_EXCLUDED_FIELDS: [&str; 3] = ["walltime", "remoteCacheHit", "runner"];

/// One build action's logged metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildRecord {
    pub data: Map<String, Value>,
}

impl BuildRecord {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Reads the identity key, failing with a description of what is wrong.
    pub fn identity(&self, field: &str) -> std::result::Result<&str, String> {
        match self.data.get(field) {
            Some(Value::String(key)) => Ok(key),
            Some(Value::Null) => Err(format!("field \"{}\" is null", field)),
            Some(other) => Err(format!(
                "field \"{}\" must be a string, found {}",
                field,
                json_type_name(other)
            )),
            None => Err(format!("field \"{}\" is missing", field)),
        }
    }
}

/// Records keyed by identity; a later record with the same key replaces the earlier one.
pub type BuildRecordIndex = BTreeMap<String, BuildRecord>;

/// Field names skipped at every object level during comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.names.iter()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        DEFAULT_EXCLUDED_FIELDS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DifferenceKind {
    Changed { left: Value, right: Value },
    /// Only present on the left side.
    Removed { left: Value },
    /// Only present on the right side.
    Added { right: Value },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: String,
    pub kind: DifferenceKind,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        };
        match &self.kind {
            DifferenceKind::Changed { left, right } => {
                write!(f, "~ {}: {} -> {}", path, left, right)
            }
            DifferenceKind::Removed { left } => write!(f, "- {}: {}", path, left),
            DifferenceKind::Added { right } => write!(f, "+ {}: {}", path, right),
        }
    }
}

/// All differences found for one action present in both logs.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDiff {
    pub key: String,
    pub differences: Vec<Difference>,
}

impl RecordDiff {
    pub fn body(&self) -> String {
        self.differences
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for RecordDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The action \"{}\" is different:\n{}\n----------",
            self.key,
            self.body()
        )
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
