// Output formatting — terminal display, JSON results and markdown reports.

pub mod json;
pub mod markdown;
pub mod terminal;

use serde::{Deserialize, Serialize};

/// One wordset and its coherence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWordset {
    pub words: Vec<String>,
    pub score: f64,
}

/// Everything a scoring run produced, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRun {
    pub configuration: String,
    pub scored_at: String,
    pub results: Vec<ScoredWordset>,
}

impl ScoreRun {
    pub fn new(configuration: String, wordsets: &[Vec<String>], scores: &[f64]) -> Self {
        Self {
            configuration,
            scored_at: chrono::Utc::now().to_rfc3339(),
            results: wordsets
                .iter()
                .zip(scores)
                .map(|(words, &score)| ScoredWordset {
                    words: words.clone(),
                    score,
                })
                .collect(),
        }
    }

    /// Mean score over all wordsets, or None for an empty run.
    pub fn mean_score(&self) -> Option<f64> {
        if self.results.is_empty() {
            return None;
        }
        let total: f64 = self.results.iter().map(|r| r.score).sum();
        Some(total / self.results.len() as f64)
    }

    /// Indices of results ordered from most to least coherent.
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.results.len()).collect();
        order.sort_by(|&a, &b| self.results[b].score.total_cmp(&self.results[a].score));
        order
    }
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
