mod analyzer;
mod discover;
mod errors;
mod models;
mod normalize;
mod sankey;
mod sentiment;
mod store;
mod viz_export;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use analyzer::{author_text_key, doc_label, load_document};
use errors::AnalyzerError;
use models::{GroupKey, TokenCounts};
use normalize::StopwordSet;
use sankey::{grouped_counts_sankey, SankeyOptions};
use sentiment::{LexiconScorer, SentimentScorer};
use store::{AggregationStore, GroupedCounts};

/// lexflow - per-document text statistics and flow-diagram export
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Corpus root: one subdirectory per author, .txt files inside
    #[arg(short, long, default_value = "data")]
    root: PathBuf,

    /// Newline-delimited stopword list
    #[arg(short, long, default_value = "data/stopwords.txt")]
    stopwords: PathBuf,

    /// Output directory for generated viz JSON files
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Keep only the N highest-count words per (author, text) group
    #[arg(long, default_value_t = 3)]
    top_n: usize,

    /// Drop flow edges lighter than this weight (0 keeps everything)
    #[arg(long, default_value_t = 0.0)]
    min_value: f64,

    /// Sankey node padding
    #[arg(long, default_value_t = 50)]
    pad: u32,

    /// Sankey canvas width
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Sankey canvas height
    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting lexflow");

    let args = Args::parse();
    let opts = SankeyOptions {
        pad: args.pad,
        width: args.width,
        height: args.height,
        min_value: args.min_value,
    };

    let stopwords = StopwordSet::load(&args.stopwords)
        .map_err(|e| anyhow::anyhow!("loading stopwords from {:?}: {e}", args.stopwords))?;
    info!("Stopwords loaded - path={}, count={}", args.stopwords.display(), stopwords.len());

    let paths = discover::text_paths(&args.root)?;
    info!("Corpus discovered - root={}, documents={}", args.root.display(), paths.len());

    let scorer = LexiconScorer;
    let (agg, grouped) = ingest_batch(&paths, &stopwords, &scorer, author_text_key)?;
    info!("Grouped accumulation completed - groups={}", grouped.len());

    let flow = grouped_counts_sankey(&grouped, args.top_n, &opts);
    viz_export::write_all_viz(&args.output_dir, &agg, &flow, &opts)?;
    info!(
        "Viz export completed - output_dir={}, nodes={}, edges={}",
        args.output_dir.display(),
        flow.nodes.len(),
        flow.edges.len()
    );

    Ok(())
}

/// Per-document try/skip ingestion plus the grouped bulk pass.
///
/// One bad document never halts the batch: failures are warned and skipped,
/// and grouped accumulation runs over the surviving documents' cached
/// frequency tables rather than re-parsing the corpus, so a skipped path
/// cannot surface a second time and abort the run.
fn ingest_batch<K>(
    paths: &[PathBuf],
    stopwords: &StopwordSet,
    scorer: &dyn SentimentScorer,
    key_fn: K,
) -> Result<(AggregationStore, GroupedCounts), AnalyzerError>
where
    K: Fn(&Path) -> Option<GroupKey>,
{
    let mut agg = AggregationStore::new();
    let mut loaded: Vec<PathBuf> = Vec::new();
    let mut wordcounts: BTreeMap<PathBuf, TokenCounts> = BTreeMap::new();

    let mut failed = 0usize;
    for path in paths {
        match load_document(path, stopwords, scorer) {
            Ok(stats) => {
                wordcounts.insert(path.clone(), stats.wordcount.clone());
                agg.insert(doc_label(path), stats);
                loaded.push(path.clone());
            }
            Err(e) => {
                failed += 1;
                warn!("Skipping document - path={}, error={}", path.display(), e);
            }
        }
    }
    info!("Ingestion completed - loaded={}, skipped={}", agg.len(), failed);

    let grouped = AggregationStore::accumulate_grouped(&loaded, key_fn, |p| {
        Ok(wordcounts.get(p).cloned().unwrap_or_default())
    })?;
    Ok((agg, grouped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn bad_document_is_skipped_without_aborting_the_batch() {
        let root = std::env::temp_dir().join("lexflow-batch-test");
        fs::remove_dir_all(&root).ok();
        fs::create_dir_all(root.join("Keats")).unwrap();
        fs::write(root.join("Keats/ode.txt"), "season of mists\n").unwrap();
        fs::write(root.join("Keats/notes.md"), "wrong format\n").unwrap();

        let paths = vec![
            root.join("Keats/notes.md"),     // rejected by the format check
            root.join("Keats/missing.txt"),  // IO failure at read time
            root.join("Keats/ode.txt"),
        ];
        // Absolute temp paths don't fit the depth convention; key on the
        // parent directory name instead.
        let key = |p: &Path| {
            let author = p.parent()?.file_name()?.to_str()?;
            let text = p.file_stem()?.to_str()?;
            Some(GroupKey::new(author, text))
        };

        let (agg, grouped) =
            ingest_batch(&paths, &StopwordSet::from_words(["of"]), &LexiconScorer, key)
                .unwrap();

        assert_eq!(agg.len(), 1);
        assert_eq!(agg.numwords["Keats ode"], 2);
        assert_eq!(grouped.len(), 1);
        let table = &grouped[&GroupKey::new("Keats", "ode")];
        assert_eq!(table["season"], 1);
        assert_eq!(table["mists"], 1);

        fs::remove_dir_all(root).ok();
    }
}

