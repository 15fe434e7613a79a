// Database layer — SQLite storage for a persisted corpus index.
//
// We use rusqlite with the "bundled" feature so there's no system SQLite
// dependency. The database file lives wherever COHERENCE_DB_PATH points
// (defaults to the user data directory).

pub mod models;
pub mod queries;
pub mod schema;
pub mod sqlite;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

pub use models::IndexMetadata;
pub use sqlite::SqliteIndex;

/// Open (or create) the database and run migrations.
///
/// Called by `topic-coherence index` before writing postings.
pub fn initialize(db_path: &str) -> Result<Connection> {
    // Create parent directories if needed
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for index: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open index at {}", db_path))?;

    // WAL lets scoring runs read while another process re-indexes
    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open an existing index database (fails if it doesn't exist yet).
pub fn open(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Index not found at {}. Run `topic-coherence index --corpus <file>` first.",
            db_path
        );
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open index at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(conn)
}
