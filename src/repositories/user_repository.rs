// src/repositories/user_repository.rs
//
// User and role lookups. Users are provisioned externally; this repository
// is read-only.

use rusqlite::{params, OptionalExtension};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{Role, User, UserDetailsProjection};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// One row per granted role; empty when the username is unknown
    fn search_user_and_roles_by_username(
        &self,
        username: &str,
    ) -> AppResult<Vec<UserDetailsProjection>>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let user = conn
            .query_row(
                "SELECT id, username, password FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(User {
                        id: row.get("id")?,
                        username: row.get("username")?,
                        password: row.get("password")?,
                        roles: Vec::new(),
                    })
                },
            )
            .optional()?;

        let Some(mut user) = user else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT r.id, r.authority
             FROM roles r
             INNER JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = ?1
             ORDER BY r.id",
        )?;

        user.roles = stmt
            .query_map(params![user.id], |row| {
                Ok(Role {
                    id: row.get("id")?,
                    authority: row.get("authority")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(user))
    }

    fn search_user_and_roles_by_username(
        &self,
        username: &str,
    ) -> AppResult<Vec<UserDetailsProjection>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT u.username, u.password, r.id AS role_id, r.authority
             FROM users u
             INNER JOIN user_roles ur ON ur.user_id = u.id
             INNER JOIN roles r ON r.id = ur.role_id
             WHERE u.username = ?1
             ORDER BY r.id",
        )?;

        let rows: Vec<UserDetailsProjection> = stmt
            .query_map(params![username], |row| {
                Ok(UserDetailsProjection {
                    username: row.get("username")?,
                    password: row.get("password")?,
                    role_id: row.get("role_id")?,
                    authority: row.get("authority")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
