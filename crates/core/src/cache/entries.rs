//! Metadata index operations.
//!
//! One row per distinct image. Rows are only ever appended; there is no
//! update or delete path.

use super::connection::CacheDb;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, OptionalExtension};

/// Identifier assigned by the index. Never reused.
pub type EntryId = i64;

/// A cached image and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub id: EntryId,
    /// Title as received from the descriptor, unsanitized.
    pub title: String,
    pub explanation: String,
    /// Absolute path of the stored image bytes.
    pub path: String,
    /// Lowercase hex SHA-256 of the image bytes.
    pub hash: String,
}

impl CacheDb {
    /// Append a row and return its id.
    ///
    /// Does not check for an existing row with the same hash; callers run
    /// [`CacheDb::find_by_hash`] first.
    pub async fn insert_entry(&self, title: &str, explanation: &str, path: &str, hash: &str) -> Result<EntryId, Error> {
        for (field, value) in [("title", title), ("explanation", explanation), ("path", path), ("hash", hash)] {
            if value.is_empty() {
                return Err(Error::InvalidInput(format!("{field} must not be empty")));
            }
        }

        let (title, explanation, path, hash) =
            (title.to_string(), explanation.to_string(), path.to_string(), hash.to_string());
        self.conn
            .call(move |conn| -> Result<EntryId, Error> {
                conn.execute(
                    "INSERT INTO images (title, explanation, path, hash) VALUES (?1, ?2, ?3, ?4)",
                    params![title, explanation, path, hash],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(Error::from)
    }

    /// Id of the lowest-id row with the given hash, if any.
    pub async fn find_by_hash(&self, hash: &str) -> Result<Option<EntryId>, Error> {
        let hash = hash.to_string();
        self.conn
            .call(move |conn| -> Result<Option<EntryId>, Error> {
                let id = conn
                    .query_row(
                        "SELECT id FROM images WHERE hash = ?1 ORDER BY id ASC LIMIT 1",
                        params![hash],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(id)
            })
            .await
            .map_err(Error::from)
    }

    /// Get an entry by id.
    ///
    /// Fails with [`Error::NotFound`] when no row has that id.
    pub async fn find_by_id(&self, id: EntryId) -> Result<CacheEntry, Error> {
        self.conn
            .call(move |conn| -> Result<CacheEntry, Error> {
                let result = conn.query_row(
                    "SELECT id, title, explanation, path, hash FROM images WHERE id = ?1",
                    params![id],
                    |row| {
                        Ok(CacheEntry {
                            id: row.get(0)?,
                            title: row.get(1)?,
                            explanation: row.get(2)?,
                            path: row.get(3)?,
                            hash: row.get(4)?,
                        })
                    },
                );

                match result {
                    Ok(entry) => Ok(entry),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::NotFound(id)),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Every title in insertion order.
    pub async fn list_titles(&self) -> Result<Vec<String>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT title FROM images ORDER BY id ASC")?;
                let titles = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(titles)
            })
            .await
            .map_err(Error::from)
    }

    /// Id of the lowest-id row whose image is stored at `path`, if any.
    pub async fn find_by_path(&self, path: &str) -> Result<Option<EntryId>, Error> {
        let path = path.to_string();
        self.conn
            .call(move |conn| -> Result<Option<EntryId>, Error> {
                let id = conn
                    .query_row(
                        "SELECT id FROM images WHERE path = ?1 ORDER BY id ASC LIMIT 1",
                        params![path],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(id)
            })
            .await
            .map_err(Error::from)
    }

    /// Number of rows in the index.
    pub async fn entry_count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::hash::content_hash;

    async fn insert(db: &CacheDb, title: &str, bytes: &[u8]) -> EntryId {
        let path = format!("/cache/{title}.jpg");
        db.insert_entry(title, "An explanation.", &path, &content_hash(bytes))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let hash = content_hash(b"bubble");

        let id = db
            .insert_entry("NGC #3521: Galaxy in a Bubble", "A galaxy.", "/cache/NGC_3521.jpg", &hash)
            .await
            .unwrap();

        let entry = db.find_by_id(id).await.unwrap();
        assert_eq!(
            entry,
            CacheEntry {
                id,
                title: "NGC #3521: Galaxy in a Bubble".to_string(),
                explanation: "A galaxy.".to_string(),
                path: "/cache/NGC_3521.jpg".to_string(),
                hash,
            }
        );
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.find_by_id(7).await;
        assert!(matches!(result, Err(Error::NotFound(7))));
    }

    #[tokio::test]
    async fn test_find_by_hash() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let id = insert(&db, "Moon", b"moon").await;
        insert(&db, "Sun", b"sun").await;

        assert_eq!(db.find_by_hash(&content_hash(b"moon")).await.unwrap(), Some(id));
        assert_eq!(db.find_by_hash(&content_hash(b"mars")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_by_hash_returns_lowest_id() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let first = insert(&db, "First", b"same").await;
        let second = insert(&db, "Second", b"same").await;
        assert!(second > first);

        assert_eq!(db.find_by_hash(&content_hash(b"same")).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_find_by_path() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let id = insert(&db, "Moon", b"moon").await;

        assert_eq!(db.find_by_path("/cache/Moon.jpg").await.unwrap(), Some(id));
        assert_eq!(db.find_by_path("/cache/Sun.jpg").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_increase_monotonically() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let a = insert(&db, "A", b"a").await;
        let b = insert(&db, "B", b"b").await;
        let c = insert(&db, "C", b"c").await;
        assert!(a > 0);
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn test_list_titles_empty() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert!(db.list_titles().await.unwrap().is_empty());
        assert_eq!(db.entry_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_titles_insertion_order() {
        let db = CacheDb::open_in_memory().await.unwrap();
        for (title, bytes) in [("Zeta", b"z"), ("Alpha", b"a"), ("Mu", b"m")] {
            insert(&db, title, bytes).await;
        }

        assert_eq!(db.list_titles().await.unwrap(), vec!["Zeta", "Alpha", "Mu"]);
        assert_eq!(db.entry_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_insert_rejects_empty_fields() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.insert_entry("", "x", "/cache/x.jpg", "abc").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(db.entry_count().await.unwrap(), 0);
    }
}
