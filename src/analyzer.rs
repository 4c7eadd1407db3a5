use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::AnalyzerError;
use crate::models::{DocStats, GroupKey, NormalizedText, TokenCounts};
use crate::normalize::{check_format, normalize_plain, normalize_structured, DocFormat, StopwordSet};
use crate::sentiment::SentimentScorer;

/// Build the complete statistics tuple for one normalized document.
///
/// Pure aside from the delegate scorer call: counts token occurrences,
/// records the sequence length, scores the rejoined string, and retains it
/// for later bulk visualization (word clouds).
pub fn extract_stats(norm: &NormalizedText, scorer: &dyn SentimentScorer) -> DocStats {
    let mut wordcount = TokenCounts::new();
    for token in &norm.tokens {
        *wordcount.entry(token.clone()).or_insert(0) += 1;
    }
    let sentiment = scorer.score(&norm.joined);
    DocStats {
        wordcount,
        numwords: norm.tokens.len(),
        polarity: sentiment.polarity,
        subjectivity: sentiment.subjectivity,
        allwords: norm.joined.clone(),
    }
}

/// Ingest a single document: validate the extension first (no partial read
/// on rejected formats), then read, normalize per format, and extract stats.
///
/// Errors propagate unchanged; the batch loop in the caller decides whether
/// to skip-and-log or abort.
pub fn load_document(
    path: &Path,
    stopwords: &StopwordSet,
    scorer: &dyn SentimentScorer,
) -> Result<DocStats, AnalyzerError> {
    let format = check_format(path)?;
    let raw = fs::read_to_string(path)?;
    let norm = match format {
        DocFormat::PlainText => normalize_plain(&raw, stopwords),
        DocFormat::Structured => normalize_structured(&raw, path, stopwords)?,
    };
    let stats = extract_stats(&norm, scorer);
    debug!(
        "Document parsed - path={}, tokens={}, polarity={:.3}, subjectivity={:.3}",
        path.display(),
        stats.numwords,
        stats.polarity,
        stats.subjectivity
    );
    Ok(stats)
}

/// Default grouping-key derivation from an author-per-directory layout:
/// `root/author/text.txt` (3 components) or `data/root/author/text.txt`
/// (4 components). Any other depth contributes nothing to grouped
/// accumulation — silent exclusion, by contract, not an error. Callers with
/// richer metadata can supply their own key function instead.
pub fn author_text_key(path: &Path) -> Option<GroupKey> {
    let parts: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let (author, file) = match parts.len() {
        4 => (&parts[2], &parts[3]),
        3 => (&parts[1], &parts[2]),
        _ => return None,
    };
    let text = file.split('.').next().unwrap_or(file);
    Some(GroupKey::new(author.clone(), text))
}

/// Display label for a document: parent directory name plus file stem,
/// e.g. `data/letters/Keats/1818-07-26.txt` → "Keats 1818-07-26".
pub fn doc_label(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.parent().and_then(|p| p.file_name()) {
        Some(dir) => format!("{} {}", dir.to_string_lossy(), stem),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use crate::normalize::StopwordSet;
    use std::path::PathBuf;

    /// Deterministic test double for the scorer seam.
    struct FixedScorer(f32, f32);

    impl SentimentScorer for FixedScorer {
        fn score(&self, _text: &str) -> Sentiment {
            Sentiment {
                polarity: self.0,
                subjectivity: self.1,
            }
        }
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("lexflow-analyzer-{name}"));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn stats_invariants_hold() {
        let norm = normalize_plain(
            "the cat sat. the cat ran! the dog slept.",
            &StopwordSet::empty(),
        );
        let stats = extract_stats(&norm, &FixedScorer(0.25, 0.5));

        assert_eq!(stats.numwords, norm.tokens.len());
        let sum: u64 = stats.wordcount.values().sum();
        assert_eq!(sum, stats.numwords as u64);
        assert_eq!(stats.wordcount["cat"], 2);
        assert_eq!(stats.wordcount["the"], 3);
        assert_eq!(stats.polarity, 0.25);
        assert_eq!(stats.subjectivity, 0.5);
        assert_eq!(stats.allwords, norm.joined);
    }

    #[test]
    fn load_document_rejects_format_before_reading() {
        // Nonexistent .md path: must fail on format, never on IO.
        let err = load_document(
            Path::new("does/not/exist/notes.md"),
            &StopwordSet::empty(),
            &FixedScorer(0.0, 0.0),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidFormat { .. }));
    }

    #[test]
    fn load_document_plain_text_round_trip() {
        let path = temp_file("plain.txt", "The cat sat. The dog ran!\n");
        let stop = StopwordSet::from_words(["the"]);
        let stats = load_document(&path, &stop, &FixedScorer(0.0, 0.0)).unwrap();
        assert_eq!(stats.numwords, 4);
        assert_eq!(stats.allwords, "cat sat dog ran");
        fs::remove_file(path).ok();
    }

    #[test]
    fn load_document_structured_round_trip() {
        let path = temp_file("doc.json", r#"{"text": "green hills and 42 rivers"}"#);
        let stop = StopwordSet::from_words(["and"]);
        let stats = load_document(&path, &stop, &FixedScorer(0.0, 0.0)).unwrap();
        assert_eq!(stats.numwords, 3);
        assert_eq!(stats.allwords, "green hills rivers");
        fs::remove_file(path).ok();
    }

    #[test]
    fn group_key_handles_both_supported_depths() {
        assert_eq!(
            author_text_key(Path::new("data/letters/Keats/ode.txt")),
            Some(GroupKey::new("Keats", "ode"))
        );
        assert_eq!(
            author_text_key(Path::new("letters/Shelley/mont-blanc.txt")),
            Some(GroupKey::new("Shelley", "mont-blanc"))
        );
    }

    #[test]
    fn group_key_silently_excludes_other_depths() {
        assert_eq!(author_text_key(Path::new("ode.txt")), None);
        assert_eq!(author_text_key(Path::new("a/b/c/d/e.txt")), None);
    }

    #[test]
    fn doc_label_is_parent_plus_stem() {
        assert_eq!(
            doc_label(Path::new("data/letters/Keats/1818-07-26.txt")),
            "Keats 1818-07-26"
        );
    }
}
