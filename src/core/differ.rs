use crate::domain::model::{
    BuildRecord, BuildRecordIndex, Difference, DifferenceKind, ExclusionSet, RecordDiff,
};
use crate::domain::ports::ConfigProvider;
use serde_json::{Map, Number, Value};

/// Structural comparison of build records, skipping excluded field names at every object level.
#[derive(Debug, Clone, Default)]
pub struct RecordDiffer {
    exclusions: ExclusionSet,
}

impl RecordDiffer {
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self { exclusions }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.excluded_fields().clone())
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Yields a [`RecordDiff`] for each key of `left` also in `right` whose records differ.
    ///
    /// Keys present on only one side are skipped in both directions.
    pub fn diff<'a>(
        &'a self,
        left: &'a BuildRecordIndex,
        right: &'a BuildRecordIndex,
    ) -> impl Iterator<Item = RecordDiff> + 'a {
        left.iter().filter_map(move |(key, left_record)| {
            let Some(right_record) = right.get(key) else {
                tracing::debug!("Action \"{}\" only exists in the first log, skipping", key);
                return None;
            };

            let differences = self.compare_records(left_record, right_record);
            if differences.is_empty() {
                None
            } else {
                Some(RecordDiff {
                    key: key.clone(),
                    differences,
                })
            }
        })
    }

    pub fn compare_records(&self, left: &BuildRecord, right: &BuildRecord) -> Vec<Difference> {
        let mut differences = Vec::new();
        let mut path = String::new();
        self.compare_objects(&left.data, &right.data, &mut path, &mut differences);
        differences
    }

    pub fn compare(&self, left: &Value, right: &Value) -> Vec<Difference> {
        let mut differences = Vec::new();
        let mut path = String::new();
        self.compare_values(left, right, &mut path, &mut differences);
        differences
    }

    fn compare_values(
        &self,
        left: &Value,
        right: &Value,
        path: &mut String,
        out: &mut Vec<Difference>,
    ) {
        match (left, right) {
            (Value::Object(l), Value::Object(r)) => self.compare_objects(l, r, path, out),
            (Value::Array(l), Value::Array(r)) => self.compare_arrays(l, r, path, out),
            (Value::Number(l), Value::Number(r)) => {
                if !numbers_equal(l, r) {
                    out.push(changed(path, left, right));
                }
            }
            _ => {
                if left != right {
                    out.push(changed(path, left, right));
                }
            }
        }
    }

    fn compare_objects(
        &self,
        left: &Map<String, Value>,
        right: &Map<String, Value>,
        path: &mut String,
        out: &mut Vec<Difference>,
    ) {
        let mut keys: Vec<&String> = left
            .keys()
            .chain(right.keys().filter(|k| !left.contains_key(*k)))
            .filter(|k| !self.exclusions.contains(k))
            .collect();
        keys.sort();

        for key in keys {
            let mark = path.len();
            push_key(path, key);

            match (left.get(key), right.get(key)) {
                (Some(l), Some(r)) => self.compare_values(l, r, path, out),
                (Some(l), None) => out.push(Difference {
                    path: path.clone(),
                    kind: DifferenceKind::Removed { left: l.clone() },
                }),
                (None, Some(r)) => out.push(Difference {
                    path: path.clone(),
                    kind: DifferenceKind::Added { right: r.clone() },
                }),
                (None, None) => {}
            }

            path.truncate(mark);
        }
    }

    fn compare_arrays(
        &self,
        left: &[Value],
        right: &[Value],
        path: &mut String,
        out: &mut Vec<Difference>,
    ) {
        for i in 0..left.len().max(right.len()) {
            let mark = path.len();
            path.push_str(&format!("[{}]", i));

            match (left.get(i), right.get(i)) {
                (Some(l), Some(r)) => self.compare_values(l, r, path, out),
                (Some(l), None) => out.push(Difference {
                    path: path.clone(),
                    kind: DifferenceKind::Removed { left: l.clone() },
                }),
                (None, Some(r)) => out.push(Difference {
                    path: path.clone(),
                    kind: DifferenceKind::Added { right: r.clone() },
                }),
                (None, None) => {}
            }

            path.truncate(mark);
        }
    }
}

fn changed(path: &str, left: &Value, right: &Value) -> Difference {
    Difference {
        path: path.to_string(),
        kind: DifferenceKind::Changed {
            left: left.clone(),
            right: right.clone(),
        },
    }
}

// 整數精確比較，其餘轉成 f64，讓 1 與 1.0 視為相同
fn numbers_equal(left: &Number, right: &Number) -> bool {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l == r;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

fn push_key(path: &mut String, key: &str) {
    let plain = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if plain {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(key);
    } else {
        path.push('[');
        path.push_str(&Value::String(key.to_string()).to_string());
        path.push(']');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> BuildRecord {
        match value {
            Value::Object(data) => BuildRecord::new(data),
            other => panic!("not an object: {}", other),
        }
    }

    fn index(records: Vec<Value>) -> BuildRecordIndex {
        records
            .into_iter()
            .map(record)
            .map(|r| (r.identity("progressMessage").unwrap().to_string(), r))
            .collect()
    }

    #[test]
    fn test_excluded_fields_are_ignored() {
        let differ = RecordDiffer::default();
        let left = record(json!({
            "progressMessage": "compile foo.c",
            "walltime": 1.2,
            "remoteCacheHit": false,
            "runner": "local",
            "exitCode": 0
        }));
        let right = record(json!({
            "progressMessage": "compile foo.c",
            "walltime": 9.9,
            "remoteCacheHit": true,
            "exitCode": 0
        }));

        assert!(differ.compare_records(&left, &right).is_empty());
    }

    #[test]
    fn test_exclusion_applies_to_nested_objects() {
        let differ = RecordDiffer::default();
        let left = json!({"metrics": {"walltime": 1, "cpu": 2}, "spawns": [{"runner": "a"}]});
        let right = json!({"metrics": {"walltime": 5, "cpu": 2}, "spawns": [{"runner": "b"}]});

        assert!(differ.compare(&left, &right).is_empty());
    }

    #[test]
    fn test_changed_scalar_is_reported() {
        let differ = RecordDiffer::default();
        let diffs = differ.compare(
            &json!({"progressMessage": "link bar", "exitCode": 0}),
            &json!({"progressMessage": "link bar", "exitCode": 1}),
        );

        assert_eq!(
            diffs,
            vec![Difference {
                path: "exitCode".to_string(),
                kind: DifferenceKind::Changed {
                    left: json!(0),
                    right: json!(1)
                },
            }]
        );
    }

    #[test]
    fn test_added_removed_and_nested_paths() {
        let differ = RecordDiffer::new(ExclusionSet::empty());
        let diffs = differ.compare(
            &json!({"a": {"b": [1, {"c": true}]}, "gone": "x", "env var": 1}),
            &json!({"a": {"b": [1, {"c": false}, 3]}, "new": null, "env var": 2}),
        );
        let rendered: Vec<String> = diffs.iter().map(ToString::to_string).collect();

        assert_eq!(
            rendered,
            vec![
                "~ a.b[1].c: true -> false",
                "+ a.b[2]: 3",
                "~ [\"env var\"]: 1 -> 2",
                "- gone: \"x\"",
                "+ new: null",
            ]
        );
    }

    #[test]
    fn test_type_mismatch_is_a_change() {
        let differ = RecordDiffer::default();
        let diffs = differ.compare(&json!({"x": "1"}), &json!({"x": 1}));
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].to_string(), "~ x: \"1\" -> 1");

        let root = differ.compare(&json!([1]), &json!({"x": 1}));
        assert_eq!(root[0].path, "");
    }

    #[test]
    fn test_integer_and_float_compare_numerically() {
        let differ = RecordDiffer::default();
        assert!(differ.compare(&json!({"n": 1}), &json!({"n": 1.0})).is_empty());
        assert!(differ.compare(&json!({"n": -3}), &json!({"n": -3})).is_empty());
        assert_eq!(differ.compare(&json!({"n": 1}), &json!({"n": 1.5})).len(), 1);
    }

    #[test]
    fn test_equality_is_symmetric() {
        let differ = RecordDiffer::default();
        let pairs = vec![
            (json!({"a": 1, "walltime": 2}), json!({"a": 1})),
            (json!({"a": [1, 2]}), json!({"a": [1]})),
            (json!({"a": {"b": null}}), json!({"a": {}})),
            (json!({"a": "x"}), json!({"a": "x"})),
        ];

        for (a, b) in pairs {
            assert_eq!(
                differ.compare(&a, &b).is_empty(),
                differ.compare(&b, &a).is_empty(),
                "asymmetric result for {} vs {}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_diff_skips_keys_missing_from_either_side() {
        let differ = RecordDiffer::default();
        let left = index(vec![
            json!({"progressMessage": "compile foo.c", "exitCode": 0}),
            json!({"progressMessage": "link bar", "exitCode": 0}),
        ]);
        let right = index(vec![
            json!({"progressMessage": "link bar", "exitCode": 1}),
            json!({"progressMessage": "test baz", "exitCode": 1}),
        ]);

        let diffs: Vec<RecordDiff> = differ.diff(&left, &right).collect();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].key, "link bar");

        let reversed: Vec<RecordDiff> = differ.diff(&right, &left).collect();
        assert_eq!(reversed.len(), 1);
        assert_eq!(reversed[0].key, "link bar");
    }

    #[test]
    fn test_diff_is_repeatable() {
        let differ = RecordDiffer::default();
        let left = index(vec![
            json!({"progressMessage": "a", "x": 1}),
            json!({"progressMessage": "b", "x": 1}),
            json!({"progressMessage": "c", "x": 1}),
        ]);
        let right = index(vec![
            json!({"progressMessage": "a", "x": 2}),
            json!({"progressMessage": "b", "x": 1}),
            json!({"progressMessage": "c", "x": [1]}),
        ]);

        let first: Vec<RecordDiff> = differ.diff(&left, &right).collect();
        let second: Vec<RecordDiff> = differ.diff(&left, &right).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
