// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are data mappers over SQLite
// - NO cross-repository calls
// - Explicit SQL only
// - Storage constraint violations are translated, never pre-checked

pub mod movie_repository;
pub mod score_repository;
pub mod user_repository;

pub use movie_repository::{MovieRepository, SqliteMovieRepository};
pub use score_repository::{ScoreRepository, SqliteScoreRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[cfg(test)]
pub use movie_repository::MockMovieRepository;
#[cfg(test)]
pub use score_repository::MockScoreRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

/// True for SQLITE_CONSTRAINT_FOREIGNKEY failures
pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        }
        _ => false,
    }
}

/// Escape LIKE wildcards so user input matches literally (ESCAPE '\')
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
pub(crate) mod test_support {
    use rusqlite::params;
    use std::sync::Arc;

    use crate::db::{create_memory_pool, initialize_database, ConnectionPool};

    pub fn setup_pool() -> Arc<ConnectionPool> {
        let pool = create_memory_pool().unwrap();
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }
        Arc::new(pool)
    }

    pub fn insert_user(pool: &ConnectionPool, username: &str, authorities: &[&str]) -> i64 {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![username, "$2a$10$eACCYoNOHEqXve8aIWT8Nu3PkMXWBaOxJ9aORUYzfMQCbVBIhZ8tG"],
        )
        .unwrap();
        let user_id = conn.last_insert_rowid();

        for authority in authorities {
            conn.execute(
                "INSERT OR IGNORE INTO roles (authority) VALUES (?1)",
                params![authority],
            )
            .unwrap();
            let role_id: i64 = conn
                .query_row(
                    "SELECT id FROM roles WHERE authority = ?1",
                    params![authority],
                    |row| row.get(0),
                )
                .unwrap();
            conn.execute(
                "INSERT INTO user_roles (user_id, role_id) VALUES (?1, ?2)",
                params![user_id, role_id],
            )
            .unwrap();
        }

        user_id
    }

    pub fn insert_score(pool: &ConnectionPool, movie_id: i64, user_id: i64, value: f64) {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO scores (movie_id, user_id, value) VALUES (?1, ?2, ?3)",
            params![movie_id, user_id, value],
        )
        .unwrap();
    }
}
