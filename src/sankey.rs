use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::models::TokenCounts;
use crate::store::GroupedCounts;

/* -------------------------------------------------------------------------- */
/* Input table                                                                */
/* -------------------------------------------------------------------------- */

/// A small categorical table: an ordered chain of columns, one row of values
/// per record, and an optional weight per row. Consecutive column pairs in
/// the chain become the layers of a multi-layer flow diagram.
#[derive(Debug, Clone, Default)]
pub struct FlowTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub weights: Option<Vec<f64>>,
}

impl FlowTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            weights: None,
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, values: impl IntoIterator<Item = S>) {
        self.rows.push(values.into_iter().map(Into::into).collect());
    }

    /// Rows without an explicit weight count as 1.0, so weighted and
    /// unweighted pushes can be mixed.
    pub fn push_weighted_row<S: Into<String>>(
        &mut self,
        values: impl IntoIterator<Item = S>,
        weight: f64,
    ) {
        self.push_row(values);
        let weights = self.weights.get_or_insert_with(Vec::new);
        // Rows pushed before the first weighted one get the default weight.
        weights.resize(self.rows.len() - 1, 1.0);
        weights.push(weight);
    }
}

/* -------------------------------------------------------------------------- */
/* Output graph                                                               */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

/// Renderer-agnostic diagram description: a deduplicated, lexicographically
/// sorted label index plus weighted edges whose endpoints index into it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<FlowEdge>,
}

/// Pass-through layout configuration handed to the rendering collaborator.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SankeyOptions {
    pub pad: u32,
    pub width: u32,
    pub height: u32,
    /// Edges with `value` below this are dropped after indexing (0 disables).
    pub min_value: f64,
}

impl Default for SankeyOptions {
    fn default() -> Self {
        Self {
            pad: 50,
            width: 800,
            height: 800,
            min_value: 0.0,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Construction                                                               */
/* -------------------------------------------------------------------------- */

/// Stack consecutive column pairs into one (source, target, weight) edge
/// list. Identical pairs within a layer are grouped and their weights summed;
/// an unweighted table counts one per row. Chains shorter than two columns
/// produce no edges.
pub fn stack(table: &FlowTable) -> Vec<(String, String, f64)> {
    let mut stacked = Vec::new();
    for (src_idx, targ_idx) in (0..table.columns.len()).tuple_windows() {
        let mut grouped: BTreeMap<(String, String), f64> = BTreeMap::new();
        for (r, row) in table.rows.iter().enumerate() {
            let weight = table
                .weights
                .as_ref()
                .and_then(|w| w.get(r).copied())
                .unwrap_or(1.0);
            let key = (row[src_idx].clone(), row[targ_idx].clone());
            *grouped.entry(key).or_insert(0.0) += weight;
        }
        stacked.extend(grouped.into_iter().map(|((s, t), w)| (s, t, w)));
    }
    stacked
}

/// Build a flow graph from a categorical table: stack, index the distinct
/// labels, rewrite endpoints to indices, then apply the minimum-weight
/// threshold. Thresholding runs after indexing, so dropped edges never
/// disturb index stability; labels left unreferenced are an accepted
/// display quirk.
pub fn make_sankey(table: &FlowTable, opts: &SankeyOptions) -> FlowGraph {
    let stacked = stack(table);

    let labels: BTreeSet<&str> = stacked
        .iter()
        .flat_map(|(s, t, _)| [s.as_str(), t.as_str()])
        .collect();
    let nodes: Vec<String> = labels.into_iter().map(String::from).collect();
    let index: BTreeMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    let mut edges: Vec<FlowEdge> = stacked
        .iter()
        .map(|(s, t, w)| FlowEdge {
            source: index[s.as_str()],
            target: index[t.as_str()],
            value: *w,
        })
        .collect();

    if opts.min_value > 0.0 {
        edges.retain(|e| e.value >= opts.min_value);
    }

    debug!(
        "Sankey built - nodes={}, edges={}, min_value={}",
        nodes.len(),
        edges.len(),
        opts.min_value
    );
    FlowGraph { nodes, edges }
}

/* -------------------------------------------------------------------------- */
/* Grouped-counts convenience path                                            */
/* -------------------------------------------------------------------------- */

/// Flatten grouped frequency tables into the four-column projection
/// (author, text, word; weight = count) that the flow builder consumes.
pub fn flatten_grouped_counts(grouped: &GroupedCounts) -> FlowTable {
    let mut table = FlowTable::new(["author", "text", "word"]);
    for (key, counts) in grouped {
        for (word, count) in counts {
            table.push_weighted_row(
                [key.author.as_str(), key.text.as_str(), word.as_str()],
                *count as f64,
            );
        }
    }
    table
}

/// Restrict each group's table to its `top_n` highest-count tokens. The sort
/// is stable by descending count; frequency tables are ordered by token, so
/// tied counts resolve lexicographically (insertion order is not retained by
/// the tables and does not participate). Deterministic either way, which is
/// what reproducible diagrams need.
pub fn top_words_per_group(grouped: &GroupedCounts, top_n: usize) -> GroupedCounts {
    grouped
        .iter()
        .map(|(key, counts)| {
            let mut ranked: Vec<(&String, &u64)> = counts.iter().collect();
            ranked.sort_by_key(|(_, n)| std::cmp::Reverse(**n));
            ranked.truncate(top_n);
            let top: TokenCounts = ranked.into_iter().map(|(w, n)| (w.clone(), *n)).collect();
            (key.clone(), top)
        })
        .collect()
}

/// Higher-level helper: top-N restriction, flattening, and graph build in
/// one call, for the author → text → word diagram.
pub fn grouped_counts_sankey(
    grouped: &GroupedCounts,
    top_n: usize,
    opts: &SankeyOptions,
) -> FlowGraph {
    let restricted = top_words_per_group(grouped, top_n);
    let table = flatten_grouped_counts(&restricted);
    make_sankey(&table, opts)
}
