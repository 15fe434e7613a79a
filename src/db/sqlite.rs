// SqliteIndex — a persisted corpus index implementing CorpusAdapter.
//
// rusqlite's Connection is Send but not Sync, so it sits behind a std Mutex.
// Each lookup locks, runs one cached prepared statement, and releases. The
// metadata row is read once at open time since it never changes underneath
// a scoring run.

use std::sync::Mutex;

use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use super::models::IndexMetadata;
use super::queries;
use crate::corpus::{ContextIds, ContextMode, CorpusAdapter, MemoryIndex};
use crate::error::CoherenceError;

pub struct SqliteIndex {
    conn: Mutex<Connection>,
    metadata: IndexMetadata,
}

impl SqliteIndex {
    /// Wrap an already-opened connection. Fails if nothing was indexed yet.
    pub fn new(conn: Connection) -> Result<Self> {
        let Some(metadata) = queries::get_metadata(&conn)? else {
            anyhow::bail!("Index database contains no corpus. Run `topic-coherence index` first.");
        };
        Ok(Self {
            conn: Mutex::new(conn),
            metadata,
        })
    }

    /// Open an existing index file.
    pub fn open(db_path: &str) -> Result<Self> {
        Self::new(super::open(db_path)?)
    }

    /// Persist `index` at `db_path`, replacing any previous corpus there.
    pub fn create(db_path: &str, index: &MemoryIndex) -> Result<Self> {
        let mut conn = super::initialize(db_path)?;
        let created_at = chrono::Utc::now().to_rfc3339();
        queries::replace_index(&mut conn, index, &created_at)?;
        info!(
            path = db_path,
            words = index.vocabulary_size(),
            contexts = index.total_contexts(),
            "Saved corpus index"
        );
        Self::new(conn)
    }

    pub fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    pub fn vocabulary_size(&self) -> Result<u64> {
        let conn = self.lock()?;
        queries::vocabulary_size(&conn)
    }

    pub fn top_words(&self, limit: u32) -> Result<Vec<(String, u64)>> {
        let conn = self.lock()?;
        queries::top_words(&conn, limit)
    }

    pub fn schema_version(&self) -> Result<i64> {
        let conn = self.lock()?;
        super::schema::schema_version(&conn)
    }

    /// Load the whole index into memory, for corpora small enough to fit.
    pub fn to_memory(&self) -> Result<MemoryIndex> {
        let conn = self.lock()?;
        queries::load_index(&conn)?
            .ok_or_else(|| anyhow::anyhow!("Index metadata disappeared while loading"))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("Index connection lock poisoned"))
    }
}

impl CorpusAdapter for SqliteIndex {
    fn occurrence_ids(&self, word: &str) -> crate::error::Result<ContextIds> {
        let conn = self.conn.lock().map_err(|_| CoherenceError::Corpus {
            reason: "index connection lock poisoned".to_string(),
        })?;
        queries::get_posting(&conn, word)
            .map(Option::unwrap_or_default)
            .map_err(|e| CoherenceError::Corpus {
                reason: format!("lookup of {word:?} failed: {e:#}"),
            })
    }

    fn total_contexts(&self) -> u64 {
        self.metadata.total_contexts
    }

    fn context_mode(&self) -> ContextMode {
        self.metadata.context_mode
    }
}
