// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - Foreign keys enabled on every connection
// - Writers wait on a busy database instead of failing

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::PathBuf;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Name of the Unicode-aware upper-case SQL function
///
/// SQLite's built-in UPPER() only folds ASCII letters.
pub const UNICODE_UPPER: &str = "unicode_upper";

/// Register the scalar functions the repositories rely on
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_UPPER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_uppercase()))
        },
    )
}

/// Resolve the database file path
///
/// Uses the configured path when present, otherwise
/// {APP_DATA}/dsmovie/dsmovie.db. The parent directory is created.
pub fn get_database_path(config: &DatabaseConfig) -> AppResult<PathBuf> {
    let path = match &config.path {
        Some(path) => path.clone(),
        None => {
            let app_data_dir = dirs::data_dir().ok_or_else(|| {
                AppError::Other("Could not determine app data directory".to_string())
            })?;
            app_data_dir.join("dsmovie").join("dsmovie.db")
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(path)
}

/// Create a connection pool over the configured database file
///
/// - WAL journal so readers do not block the single writer
/// - busy_timeout so concurrent writers queue up
pub fn create_connection_pool(config: &DatabaseConfig) -> AppResult<ConnectionPool> {
    let db_path = get_database_path(config)?;
    log::debug!("Opening database at {}", db_path.display());

    let busy_timeout = config.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(&db_path).with_init(move |conn| {
        // busy_timeout first: switching to WAL needs a lock that sibling
        // connections may be holding while the pool fills.
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {};
             PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
            busy_timeout
        ))?;
        register_functions(conn)
    });

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    Ok(pool)
}

/// Create a single-connection pool over a private in-memory database
///
/// Every SQLite in-memory connection is its own database, so the pool is
/// capped at one connection.
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_functions(conn)
    });

    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    Ok(pool)
}

/// Create a standalone in-memory connection (for testing)
#[cfg(test)]
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory().map_err(AppError::Database)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(AppError::Database)?;
    register_functions(&conn)?;

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: Some(dir.path().join("nested").join("movies.db")),
            ..DatabaseConfig::default()
        };

        let path = get_database_path(&config).unwrap();
        assert!(path.ends_with("nested/movies.db"));
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_file_pool_enables_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: Some(dir.path().join("movies.db")),
            max_connections: 2,
            ..DatabaseConfig::default()
        };

        let pool = create_connection_pool(&config).unwrap();
        let conn = pool.get().unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);

        let timeout: i32 = conn
            .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 5000);
    }

    #[test]
    fn test_memory_pool() {
        let pool = create_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }

    #[test]
    fn test_test_connection() {
        let conn = create_test_connection().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);
    }

    #[test]
    fn test_unicode_upper_folds_accented_letters() {
        let conn = create_test_connection().unwrap();

        let upper: String = conn
            .query_row("SELECT unicode_upper('anéis e ameaça')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(upper, "ANÉIS E AMEAÇA");

        let builtin: String = conn
            .query_row("SELECT UPPER('anéis')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(builtin, "ANéIS");

        let null: Option<String> = conn
            .query_row("SELECT unicode_upper(NULL)", [], |row| row.get(0))
            .unwrap();
        assert!(null.is_none());
    }
}
