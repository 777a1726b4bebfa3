// src/db/migrations.rs
//
// Database schema initialization and demo data
//
// PRINCIPLES:
// - Explicit schema versions
// - No automatic migrations
// - Idempotent operations

use rusqlite::Connection;

use crate::error::{AppError, AppResult};

/// Current schema version
/// Increment this when adding migrations
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
///
/// Safe to call multiple times (idempotent).
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        apply_initial_schema(conn)?;
        set_schema_version(conn, CURRENT_SCHEMA_VERSION)?;
        log::info!("Database schema initialized at version {}", CURRENT_SCHEMA_VERSION);
    } else if current_version < CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is outdated. Expected {}. Manual migration required.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Load the demo roles, users and movies
///
/// Rows use fixed ids and INSERT OR IGNORE, so re-seeding is a no-op.
pub fn seed_database(conn: &Connection) -> AppResult<()> {
    let seed = include_str!("../../seed.sql");

    conn.execute_batch(seed)
        .map_err(|e| AppError::Other(format!("Failed to apply seed data: {}", e)))?;

    log::info!("Seed data applied");
    Ok(())
}

/// Returns 0 if schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(AppError::Database)?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )
    .map_err(AppError::Database)?;

    Ok(())
}

fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))?;

    Ok(())
}

/// Structural and referential health check, reported by `stats`
///
/// Collects every row of `PRAGMA integrity_check` and every dangling
/// reference from `PRAGMA foreign_key_check`; any finding is an error.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let mut problems: Vec<String> = {
        let mut stmt = conn.prepare("PRAGMA integrity_check")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let rows = rows.collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().filter(|line| line != "ok").collect()
    };

    {
        let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
        let rows = stmt.query_map([], |row| {
            let table: String = row.get(0)?;
            let rowid: Option<i64> = row.get(1)?;
            let parent: String = row.get(2)?;
            Ok(format!(
                "{} row {} references a missing {} row",
                table,
                rowid.map_or_else(|| "?".to_string(), |id| id.to_string()),
                parent
            ))
        })?;
        for problem in rows {
            problems.push(problem?);
        }
    }

    if !problems.is_empty() {
        log::error!("Integrity check found {} problem(s)", problems.len());
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            problems.join("; ")
        )));
    }

    Ok(())
}

/// Row counts and file size, for the `stats` command
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let count = |table: &str| -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        Ok(conn.query_row(&sql, [], |row| row.get(0))?)
    };

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        movie_count: count("movies")?,
        user_count: count("users")?,
        score_count: count("scores")?,
    })
}

#[derive(Debug, serde::Serialize)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub movie_count: i64,
    pub user_count: i64,
    pub score_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 0);
        initialize_database(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        // schema_version, movies, users, roles, user_roles, scores
        assert_eq!(table_count, 6);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        set_schema_version(&conn, CURRENT_SCHEMA_VERSION + 1).unwrap();

        assert!(initialize_database(&conn).is_err());
    }

    #[test]
    fn test_score_without_movie_violates_foreign_key() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO scores (movie_id, user_id, value) VALUES (99, 99, 4.0)",
            [],
        );

        assert!(result.is_err(), "Foreign key constraint should have been violated");
    }

    #[test]
    fn test_seed_is_idempotent() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        seed_database(&conn).unwrap();
        seed_database(&conn).unwrap();

        let stats = get_database_stats(&conn).unwrap();
        assert_eq!(stats.user_count, 2);
        assert_eq!(stats.movie_count, 6);
        assert_eq!(stats.score_count, 0);
    }

    #[test]
    fn test_integrity_check_passes_on_seeded_database() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        seed_database(&conn).unwrap();

        verify_database_integrity(&conn).unwrap();
    }

    #[test]
    fn test_integrity_check_reports_dangling_scores() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        conn.execute_batch(
            "PRAGMA foreign_keys = OFF;
             INSERT INTO scores (movie_id, user_id, value) VALUES (99, 99, 4.0);
             PRAGMA foreign_keys = ON;",
        )
        .unwrap();

        let err = verify_database_integrity(&conn).unwrap_err();
        assert!(err.to_string().contains("scores row"));
    }
}
