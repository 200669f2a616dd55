use crate::core::differ::RecordDiffer;
use crate::domain::ports::RecordSource;
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;

/// Counts gathered during one comparison run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareSummary {
    pub left_actions: usize,
    pub right_actions: usize,
    pub matched_actions: usize,
    pub different_actions: usize,
}

pub struct CompareEngine<S: RecordSource> {
    source: S,
    differ: RecordDiffer,
}

impl<S: RecordSource> CompareEngine<S> {
    pub fn new(source: S, differ: RecordDiffer) -> Self {
        Self { source, differ }
    }

    /// Loads both logs before writing anything, so a bad input never leaves a partial report.
    pub fn run<W: Write>(&self, left: &Path, right: &Path, out: &mut W) -> Result<CompareSummary> {
        tracing::info!("🔍 Comparing {} against {}", left.display(), right.display());

        let left_index = self.source.load(left)?;
        let right_index = self.source.load(right)?;

        let matched_actions = left_index
            .keys()
            .filter(|key| right_index.contains_key(*key))
            .count();

        let mut summary = CompareSummary {
            left_actions: left_index.len(),
            right_actions: right_index.len(),
            matched_actions,
            different_actions: 0,
        };

        for record_diff in self.differ.diff(&left_index, &right_index) {
            writeln!(out, "{}", record_diff)?;
            summary.different_actions += 1;
        }
        out.flush()?;

        tracing::info!(
            "📊 {} of {} matched actions differ ({} in first log, {} in second)",
            summary.different_actions,
            summary.matched_actions,
            summary.left_actions,
            summary.right_actions
        );

        Ok(summary)
    }
}
