// src/viz_export.rs
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::{fs, path::Path};

use crate::sankey::{FlowGraph, SankeyOptions};
use crate::store::AggregationStore;

/// Public entry point: write all renderer-ready visualization JSONs into
/// `out_dir`. Rendering itself (plotly/D3, word-cloud images) is the
/// consumer's job; these files are the whole contract.
pub fn write_all_viz(
    out_dir: &Path,
    store: &AggregationStore,
    flow: &FlowGraph,
    opts: &SankeyOptions,
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    // 1) Layered flow diagram (Sankey)
    let sankey = VSankey {
        nodes: &flow.nodes,
        edges: flow
            .edges
            .iter()
            .map(|e| VEdge {
                source: e.source,
                target: e.target,
                value: e.value,
            })
            .collect(),
        layout: VLayout {
            pad: opts.pad,
            width: opts.width,
            height: opts.height,
            min_value: opts.min_value,
        },
    };
    write_json(out_dir.join("viz.sankey.json"), &sankey)?;

    // 2) Polarity vs subjectivity scatter points
    let sentiment = build_sentiment_points(store);
    write_json(out_dir.join("viz.sentiment.json"), &sentiment)?;

    // 3) Word-cloud source text per label
    write_json(out_dir.join("viz.clouds.json"), &store.allwords)?;

    // 4) Per-run index
    let idx = json!({
        "version": 1,
        "counts": {
            "documents": store.len(),
            "nodes": flow.nodes.len(),
            "edges": flow.edges.len(),
        },
        "files": [
            "viz.sankey.json",
            "viz.sentiment.json",
            "viz.clouds.json"
        ]
    });
    write_json(out_dir.join("viz.index.json"), &idx)?;

    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .map(|_| ())
        .map_err(|e| e.into())
}

#[derive(Serialize)]
struct VEdge {
    source: usize,
    target: usize,
    value: f64,
}

#[derive(Serialize)]
struct VLayout {
    pad: u32,
    width: u32,
    height: u32,
    min_value: f64,
}

#[derive(Serialize)]
struct VSankey<'a> {
    nodes: &'a [String],
    edges: Vec<VEdge>,
    layout: VLayout,
}

#[derive(Serialize)]
struct VSentimentPoint {
    label: String,
    polarity: f32,
    subjectivity: f32,
}

#[derive(Serialize)]
struct VSentiment {
    points: Vec<VSentimentPoint>,
}

fn build_sentiment_points(store: &AggregationStore) -> VSentiment {
    let points = store
        .polarity
        .iter()
        .map(|(label, &polarity)| VSentimentPoint {
            label: label.clone(),
            polarity,
            // Complete-tuple invariant: every polarity label has a
            // subjectivity entry.
            subjectivity: store.subjectivity.get(label).copied().unwrap_or_default(),
        })
        .collect();
    VSentiment { points }
}
