// Data models — Rust structs that map to database rows.

use serde::{Deserialize, Serialize};

use crate::corpus::ContextMode;

/// The singleton `index_meta` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub context_mode: ContextMode,
    pub total_contexts: u64,
    pub document_count: u64,
    pub created_at: String,
}

impl IndexMetadata {
    /// `(context_mode, window_size)` column values.
    pub fn mode_columns(&self) -> (&'static str, Option<i64>) {
        match self.context_mode {
            ContextMode::Document => ("document", None),
            ContextMode::SlidingWindow(size) => ("sliding_window", Some(size as i64)),
        }
    }

    pub fn mode_from_columns(mode: &str, window_size: Option<i64>) -> Option<ContextMode> {
        match (mode, window_size) {
            ("document", _) => Some(ContextMode::Document),
            ("sliding_window", Some(size)) if size > 0 => {
                Some(ContextMode::SlidingWindow(size as usize))
            }
            _ => None,
        }
    }
}
