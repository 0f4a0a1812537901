//! Index schema migrations.
//!
//! Uses a simple version table approach to track applied migrations.
//! Each migration is a SQL batch applied inside its own transaction, so a
//! failing batch leaves the recorded version untouched.

use std::num::ParseIntError;

use super::Error;
use tokio_rusqlite::{Connection, params};

/// Migration list: (version, SQL).
///
/// Migrations must be applied in order. All statements use
/// `IF NOT EXISTS`, so a cache written before version tracking existed
/// (table present, no `_migrations` rows) is adopted without data loss.
const MIGRATIONS: &[(&str, &str)] = &[
    ("1", include_str!("../../migrations/001_images.sql")),
    ("2", include_str!("../../migrations/002_images_hash_index.sql")),
];

/// Run any pending migrations.
///
/// Creates the `_migrations` table if it doesn't exist, reads the current
/// version and applies only the migrations above it. On an index that is
/// already up to date this touches nothing.
///
/// # Errors
///
/// Returns an error if a migration SQL fails to execute.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| -> Result<(), Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(Error::from)?;

        let current: i64 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| {
                row.get(0)
            })
            .map_err(Error::from)?;

        for (version, sql) in MIGRATIONS {
            let version_num: i64 = version
                .parse()
                .map_err(|e: ParseIntError| Error::MigrationFailed(e.to_string()))?;
            if version_num <= current {
                continue;
            }

            let tx = conn.transaction()?;
            tx.execute_batch(sql)
                .map_err(|e| Error::MigrationFailed(format!("version {version_num}: {e}")))?;
            tx.execute(
                "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
                params![version_num, chrono::Utc::now().to_rfc3339()],
            )?;
            tx.commit()?;

            tracing::debug!(version = version_num, "applied index migration");
        }

        Ok(())
    })
    .await
    .map_err(Error::from)
}

/// Highest migration version known to this build.
pub fn latest_version() -> i64 {
    MIGRATIONS.len() as i64
}
