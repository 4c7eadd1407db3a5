use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::errors::AnalyzerError;
use crate::models::{DocStats, GroupKey, TokenCounts};

/// Grouped accumulation result: one merged frequency table per group key.
pub type GroupedCounts = BTreeMap<GroupKey, TokenCounts>;

/// Process-wide statistics table: one named field per statistic, each mapping
/// a document label to that statistic's value. Statistics are always recorded
/// as a complete tuple per label, so every label present in one map is present
/// in all five.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationStore {
    pub wordcounts: BTreeMap<String, TokenCounts>,
    pub numwords: BTreeMap<String, usize>,
    pub polarity: BTreeMap<String, f32>,
    pub subjectivity: BTreeMap<String, f32>,
    pub allwords: BTreeMap<String, String>,
}

impl AggregationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one document's complete statistics tuple under `label`.
    /// A repeated label overwrites; it never merges.
    pub fn insert(&mut self, label: impl Into<String>, stats: DocStats) {
        let label = label.into();
        self.wordcounts.insert(label.clone(), stats.wordcount);
        self.numwords.insert(label.clone(), stats.numwords);
        self.polarity.insert(label.clone(), stats.polarity);
        self.subjectivity.insert(label.clone(), stats.subjectivity);
        self.allwords.insert(label, stats.allwords);
    }

    /// Number of documents recorded.
    pub fn len(&self) -> usize {
        self.wordcounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wordcounts.is_empty()
    }

    /// Bulk pass for the flow-diagram use case: derive a group key per path,
    /// extract that document's frequency table, and sum tables sharing a key.
    ///
    /// Paths whose key derivation returns `None` contribute nothing (silent
    /// exclusion). Extraction errors propagate via `?`. Summed-counter
    /// merging is commutative, so path order never affects the result.
    ///
    /// This path intentionally skips polarity/subjectivity/numwords: the
    /// flow diagram only consumes merged frequencies.
    pub fn accumulate_grouped<K, E>(
        paths: &[PathBuf],
        key_fn: K,
        mut extract: E,
    ) -> Result<GroupedCounts, AnalyzerError>
    where
        K: Fn(&Path) -> Option<GroupKey>,
        E: FnMut(&Path) -> Result<TokenCounts, AnalyzerError>,
    {
        let mut grouped = GroupedCounts::new();
        let mut skipped = 0usize;

        for path in paths {
            let Some(key) = key_fn(path) else {
                skipped += 1;
                continue;
            };
            let counts = extract(path)?;
            let merged = grouped.entry(key).or_default();
            for (token, n) in counts {
                *merged.entry(token).or_insert(0) += n;
            }
        }

        if skipped > 0 {
            debug!(
                "Grouped accumulation - groups={}, excluded_paths={}",
                grouped.len(),
                skipped
            );
        }
        Ok(grouped)
    }
}
