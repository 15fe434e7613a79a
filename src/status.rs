// Index status display — file size, context model, corpus size, top words.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::corpus::CorpusAdapter;
use crate::db::SqliteIndex;

/// Display index status to the terminal.
pub fn show(db_path: &str) -> Result<()> {
    if !Path::new(db_path).exists() {
        println!("Index: not built");
        println!("\nRun `topic-coherence index --corpus <file>` to build one.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Index: {} ({})", db_path, file_size);

    let index = match SqliteIndex::open(db_path) {
        Ok(index) => index,
        Err(e) => {
            println!("  {} {:#}", "!".yellow(), e);
            return Ok(());
        }
    };

    let meta = index.metadata();
    println!(
        "Contexts: {} ({}, model {})",
        meta.total_contexts,
        meta.context_mode,
        index.model_name()
    );
    println!("Documents: {}", meta.document_count);
    println!("Vocabulary: {} words", index.vocabulary_size()?);
    println!("Built: {}", meta.created_at);
    println!("Schema version: {}", index.schema_version()?);

    let top = index.top_words(10)?;
    if !top.is_empty() {
        let listed: Vec<String> = top
            .iter()
            .map(|(word, count)| format!("{word} ({count})"))
            .collect();
        println!("Most frequent: {}", listed.join(", ").dimmed());
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_show_missing_index_is_not_an_error() {
        assert!(show("/nonexistent/coherence/index.db").is_ok());
    }
}
