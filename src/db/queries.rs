// Database queries — reads and writes for the index tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::IndexMetadata;
use crate::corpus::{ContextIds, CorpusAdapter, MemoryIndex};

// --- Context ID encoding ---

/// Pack sorted context IDs as consecutive little-endian u64s.
pub fn encode_context_ids(ids: &ContextIds) -> Vec<u8> {
    let mut blob = Vec::with_capacity(ids.len() * 8);
    for id in ids.iter() {
        blob.extend_from_slice(&id.to_le_bytes());
    }
    blob
}

pub fn decode_context_ids(blob: &[u8]) -> Result<ContextIds> {
    if blob.len() % 8 != 0 {
        anyhow::bail!("Corrupt postings blob: {} bytes is not a multiple of 8", blob.len());
    }
    Ok(blob
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            u64::from_le_bytes(bytes)
        })
        .collect())
}

// --- Index metadata ---

/// Store the index metadata (singleton — always id=1).
pub fn save_metadata(conn: &Connection, meta: &IndexMetadata) -> Result<()> {
    let (mode, window_size) = meta.mode_columns();
    conn.execute(
        "INSERT INTO index_meta (id, context_mode, window_size, total_contexts, document_count, created_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            context_mode = ?1,
            window_size = ?2,
            total_contexts = ?3,
            document_count = ?4,
            created_at = ?5",
        params![
            mode,
            window_size,
            i64::try_from(meta.total_contexts)?,
            i64::try_from(meta.document_count)?,
            meta.created_at,
        ],
    )?;
    Ok(())
}

/// Load the index metadata, or None if nothing has been indexed yet.
pub fn get_metadata(conn: &Connection) -> Result<Option<IndexMetadata>> {
    let row: Option<(String, Option<i64>, i64, i64, String)> = conn
        .query_row(
            "SELECT context_mode, window_size, total_contexts, document_count, created_at
             FROM index_meta WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
        )
        .optional()?;

    let Some((mode, window_size, total_contexts, document_count, created_at)) = row else {
        return Ok(None);
    };
    let context_mode = IndexMetadata::mode_from_columns(&mode, window_size)
        .with_context(|| format!("Unknown context mode in index: {mode} ({window_size:?})"))?;

    Ok(Some(IndexMetadata {
        context_mode,
        total_contexts: u64::try_from(total_contexts)?,
        document_count: u64::try_from(document_count)?,
        created_at,
    }))
}

// --- Postings ---

/// Insert or replace one word's postings.
pub fn upsert_posting(conn: &Connection, word: &str, ids: &ContextIds) -> Result<()> {
    conn.execute(
        "INSERT INTO postings (word, context_count, context_ids)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(word) DO UPDATE SET context_count = ?2, context_ids = ?3",
        params![word, ids.len() as i64, encode_context_ids(ids)],
    )?;
    Ok(())
}

/// Context IDs of a word; None if the word was never indexed.
pub fn get_posting(conn: &Connection, word: &str) -> Result<Option<ContextIds>> {
    let mut stmt = conn.prepare_cached("SELECT context_ids FROM postings WHERE word = ?1")?;
    let blob: Option<Vec<u8>> = stmt.query_row(params![word], |row| row.get(0)).optional()?;
    blob.map(|b| decode_context_ids(&b)).transpose()
}

pub fn vocabulary_size(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM postings", [], |row| row.get(0))?;
    Ok(u64::try_from(count)?)
}

/// The `limit` words occurring in the most contexts, most frequent first.
pub fn top_words(conn: &Connection, limit: u32) -> Result<Vec<(String, u64)>> {
    let mut stmt = conn.prepare(
        "SELECT word, context_count FROM postings
         ORDER BY context_count DESC, word ASC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut words = Vec::new();
    for row in rows {
        let (word, count) = row?;
        words.push((word, u64::try_from(count)?));
    }
    Ok(words)
}

/// Replace whatever is stored with `index`, in one transaction.
pub fn replace_index(conn: &mut Connection, index: &MemoryIndex, created_at: &str) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM postings", [])?;
    for (word, ids) in index.sorted_postings() {
        upsert_posting(&tx, word, ids)?;
    }
    save_metadata(
        &tx,
        &IndexMetadata {
            context_mode: index.context_mode(),
            total_contexts: index.total_contexts(),
            document_count: index.document_count(),
            created_at: created_at.to_string(),
        },
    )?;
    tx.commit().context("Failed to commit index")?;
    Ok(())
}

/// Load every posting back into memory.
pub fn load_index(conn: &Connection) -> Result<Option<MemoryIndex>> {
    let Some(meta) = get_metadata(conn)? else {
        return Ok(None);
    };

    let mut stmt = conn.prepare("SELECT word, context_ids FROM postings")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
    })?;

    let mut postings = std::collections::HashMap::new();
    for row in rows {
        let (word, blob) = row?;
        postings.insert(word, decode_context_ids(&blob)?);
    }

    Ok(Some(MemoryIndex::from_parts(
        meta.context_mode,
        meta.total_contexts,
        meta.document_count,
        postings,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{ContextMode, IndexBuilder};
    use crate::db::schema::create_tables;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn small_index() -> MemoryIndex {
        let mut builder = IndexBuilder::new(ContextMode::SlidingWindow(2)).unwrap();
        builder.add_line("red green blue");
        builder.add_line("green");
        builder.finish()
    }

    #[test]
    fn test_context_id_blob_roundtrip() {
        let ids = ContextIds::from_unsorted(vec![0, 7, u64::MAX, 300]);
        let blob = encode_context_ids(&ids);
        assert_eq!(blob.len(), 32);
        assert_eq!(decode_context_ids(&blob).unwrap(), ids);
        assert!(decode_context_ids(&blob[..5]).is_err());
    }

    #[test]
    fn test_metadata_absent_until_indexed() {
        let conn = test_db();
        assert!(get_metadata(&conn).unwrap().is_none());
        assert!(load_index(&conn).unwrap().is_none());
    }

    #[test]
    fn test_replace_index_and_reload() {
        let mut conn = test_db();
        let index = small_index();
        replace_index(&mut conn, &index, "2026-01-01T00:00:00Z").unwrap();

        let meta = get_metadata(&conn).unwrap().unwrap();
        assert_eq!(meta.context_mode, ContextMode::SlidingWindow(2));
        assert_eq!(meta.total_contexts, index.total_contexts());
        assert_eq!(vocabulary_size(&conn).unwrap(), 3);

        let reloaded = load_index(&conn).unwrap().unwrap();
        for word in ["red", "green", "blue", "absent"] {
            assert_eq!(
                reloaded.occurrence_ids(word).unwrap(),
                index.occurrence_ids(word).unwrap()
            );
        }
    }

    #[test]
    fn test_replace_drops_old_words() {
        let mut conn = test_db();
        replace_index(&mut conn, &small_index(), "t0").unwrap();

        let mut builder = IndexBuilder::new(ContextMode::Document).unwrap();
        builder.add_line("violet");
        replace_index(&mut conn, &builder.finish(), "t1").unwrap();

        assert!(get_posting(&conn, "red").unwrap().is_none());
        assert_eq!(get_posting(&conn, "violet").unwrap().unwrap().as_slice(), &[0]);
        assert_eq!(get_metadata(&conn).unwrap().unwrap().created_at, "t1");
    }

    #[test]
    fn test_top_words_by_context_count() {
        let mut conn = test_db();
        replace_index(&mut conn, &small_index(), "t0").unwrap();
        let top = top_words(&conn, 1).unwrap();
        assert_eq!(top[0].0, "green");
    }
}
