use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token frequency table. BTreeMap keeps iteration order deterministic,
/// which downstream flow-graph construction relies on.
pub type TokenCounts = BTreeMap<String, u64>;

/// Output of the text normalizer: the surviving token sequence (order and
/// duplicates preserved) and the tokens rejoined by single spaces.
#[derive(Debug, Clone, Default)]
pub struct NormalizedText {
    pub tokens: Vec<String>,
    pub joined: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Sentiment {
    pub polarity: f32,     // [-1.0, 1.0]
    pub subjectivity: f32, // [0.0, 1.0]
}

/// Complete per-document statistics tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocStats {
    pub wordcount: TokenCounts,
    pub numwords: usize,
    pub polarity: f32,
    pub subjectivity: f32,
    pub allwords: String,
}

/// Composite identity used to merge frequency tables across documents
/// belonging to the same logical entity, e.g. (author, letter name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub author: String,
    pub text: String,
}

impl GroupKey {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}
