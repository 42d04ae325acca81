//! Migration runner
//!
//! Applies migrations with checksums, gap detection, and idempotency

#![allow(clippy::result_large_err)]

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::get_migrations;
use rusqlite::Connection;

/// Apply all pending migrations to the database
///
/// # Errors
///
/// Fails when a recorded migration's checksum no longer matches the embedded
/// SQL, when the recorded set is not a prefix of the embedded list, or when a
/// migration's SQL fails.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    let applied = applied_migrations(conn)?;
    let migrations = get_migrations();

    // Recorded migrations must be exactly the embedded prefix
    for (position, (id, checksum)) in applied.iter().enumerate() {
        let Some(expected) = migrations.get(position) else {
            return Err(migration_error(id, "recorded but unknown to this build"));
        };
        if expected.id != id.as_str() {
            return Err(migration_error(
                expected.id,
                &format!("gap in applied migrations (found {} in its place)", id),
            ));
        }
        let actual = compute_checksum(expected.sql);
        if let Some(recorded) = checksum {
            if *recorded != actual {
                return Err(checksum_mismatch(id, recorded, &actual));
            }
        }
    }

    for migration in migrations.iter().skip(applied.len()) {
        apply_migration(conn, migration.id, migration.sql)?;
    }

    Ok(())
}

/// Recorded migrations in application order with their checksums
pub fn applied_migrations(conn: &Connection) -> Result<Vec<(String, Option<String>)>> {
    let mut stmt = conn
        .prepare("SELECT migration_id, checksum FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<()> {
    let checksum = compute_checksum(sql);

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute_batch(sql)
        .map_err(|e| migration_error(migration_id, &e.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![migration_id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(migration_id, "applied migration");
    Ok(())
}
