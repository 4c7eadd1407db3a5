use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::models::Sentiment;

/// Injected scoring capability: one method, string in, two scores out.
/// Lets callers substitute alternative engines or deterministic test doubles.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> Sentiment;
}

/// Default scorer: boundary-exact lexicon counting over whitespace tokens.
///
/// Polarity is the Laplace-smoothed normalized difference of positive and
/// negative hits; subjectivity is the share of opinion-bearing tokens.
/// Empty input scores neutral zero on both axes rather than failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Sentiment {
        let mut total = 0usize;
        let mut pos = 0usize;
        let mut neg = 0usize;
        let mut subj = 0usize;

        for raw in text.split_whitespace() {
            let word = raw.to_lowercase();
            total += 1;
            if POSITIVE_WORDS.contains(word.as_str()) {
                pos += 1;
            }
            if NEGATIVE_WORDS.contains(word.as_str()) {
                neg += 1;
            }
            if SUBJECTIVE_WORDS.contains(word.as_str()) {
                subj += 1;
            }
        }

        if total == 0 {
            return Sentiment::default();
        }

        Sentiment {
            polarity: norm_smooth(neg as f32, pos as f32),
            subjectivity: (subj as f32 / total as f32).clamp(0.0, 1.0),
        }
    }
}

/// Laplace-smoothed polarity; reduces saturation at ±1.
fn norm_smooth(left: f32, right: f32) -> f32 {
    let alpha = 1.0;
    let num = (right + alpha) - (left + alpha);
    let den = (right + left) + 2.0 * alpha;
    let raw = if den > 0.0 { num / den } else { 0.0 };
    (raw * 0.85).clamp(-0.95, 0.95)
}

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "wonderful", "beautiful", "happy", "joy", "love",
        "loved", "hope", "hopeful", "progress", "improved", "success", "successful",
        "optimistic", "recovery", "breakthrough", "kind", "pleasant", "delight",
        "delightful", "fortunate", "glad", "cheerful", "admirable", "splendid", "fine",
        "best", "better", "triumph", "warm", "generous", "gentle",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "terrible", "awful", "horrible", "sad", "sorrow", "grief", "fear",
        "afraid", "worry", "worried", "anxious", "anger", "angry", "hate", "hated",
        "crisis", "panic", "collapse", "threat", "danger", "dangerous", "failure",
        "failed", "wrong", "miserable", "dreadful", "bitter", "cruel", "worst",
        "worse", "pain", "painful", "loss", "hopeless",
    ]
    .into_iter()
    .collect()
});

static SUBJECTIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "think", "believe", "feel", "felt", "seems", "seemed", "perhaps", "probably",
        "surely", "certainly", "apparently", "likely", "unlikely", "opinion", "suppose",
        "suspect", "doubt", "wish", "hope", "wonderful", "terrible", "awful", "amazing",
        "horrible", "beautiful", "best", "worst", "lovely", "remarkable", "astonishing",
    ]
    .into_iter()
    .collect()
});
