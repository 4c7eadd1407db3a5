use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::errors::AnalyzerError;
use crate::models::NormalizedText;

/// Punctuation replaced by commas before tokenization (plain-text path only).
const PUNCTUATION: &[char] = &[
    ' ', '(', ')', '"', '?', '[', ']', '.', '&', '\\', ',', '/', '!',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    PlainText,
    Structured,
}

/// Validate the extension hint before any read happens. Only `.txt` and
/// `.json` are recognized; everything else is rejected fail-fast.
pub fn check_format(path: &Path) -> Result<DocFormat, AnalyzerError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("txt") => Ok(DocFormat::PlainText),
        Some("json") => Ok(DocFormat::Structured),
        _ => Err(AnalyzerError::InvalidFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Caller-supplied exclusion list, loaded once and reused across documents.
///
/// Membership is case-sensitive against the set as given: normalized tokens
/// are lowercase, so stopwords must be lowercase to take effect.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: BTreeSet<String>,
}

impl StopwordSet {
    /// Load a newline-delimited stopword file in full.
    pub fn load(path: &Path) -> Result<Self, AnalyzerError> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::from_words(raw.lines()))
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Normalize line-oriented plain text into a cleaned token sequence.
///
/// Stages: trim each line, replace the fixed punctuation set with commas,
/// concatenate and lowercase, split on commas, strip digits, drop empties,
/// drop stopwords, rejoin survivors with single spaces.
pub fn normalize_plain(content: &str, stopwords: &StopwordSet) -> NormalizedText {
    let mut all_text = String::with_capacity(content.len());
    for line in content.lines() {
        let replaced: String = line
            .trim()
            .chars()
            .map(|c| if PUNCTUATION.contains(&c) { ',' } else { c })
            .collect();
        all_text.push_str(&replaced.to_lowercase());
    }
    finish_tokens(all_text.split(','), stopwords)
}

/// Normalize the `"text"` field of a structured (JSON) document.
///
/// Splits on whitespace only; no punctuation handling or lowercasing, then
/// the same digit-strip / empty-drop / stopword stages as the plain path.
pub fn normalize_structured(
    raw: &str,
    path: &Path,
    stopwords: &StopwordSet,
) -> Result<NormalizedText, AnalyzerError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let text = value
        .get("text")
        .and_then(|t| t.as_str())
        .ok_or_else(|| AnalyzerError::MissingTextField {
            path: path.to_path_buf(),
        })?;
    Ok(finish_tokens(text.split_whitespace(), stopwords))
}

/// Shared tail of both normalizers: digit removal, empty-token removal,
/// stopword removal, and the single-space rejoin.
fn finish_tokens<'a, I>(candidates: I, stopwords: &StopwordSet) -> NormalizedText
where
    I: Iterator<Item = &'a str>,
{
    let tokens: Vec<String> = candidates
        .map(|c| c.chars().filter(|ch| !ch.is_numeric()).collect::<String>())
        .filter(|w| !w.is_empty())
        .filter(|w| !stopwords.contains(w))
        .collect();
    let joined = tokens.join(" ");
    NormalizedText { tokens, joined }
}
