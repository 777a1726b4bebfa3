use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_CLIENT: &str = "ROLE_CLIENT";

/// A granted authority such as `ROLE_ADMIN`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub authority: String,
}

impl Role {
    pub fn new(id: i64, authority: impl Into<String>) -> Self {
        Self {
            id,
            authority: authority.into(),
        }
    }
}

/// A registered account. Users are provisioned outside this service and are
/// read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Stored credential hash, never exposed to clients
    #[serde(skip_serializing)]
    pub password: String,

    pub roles: Vec<Role>,
}

impl User {
    pub fn has_role(&self, authority: &str) -> bool {
        self.roles.iter().any(|role| role.authority == authority)
    }
}

/// One row of the user/role join: a user appears once per granted role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetailsProjection {
    pub username: String,
    pub password: String,
    pub role_id: i64,
    pub authority: String,
}

/// What an external login handshake needs to make a decision: the stored
/// credential hash and the granted roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub username: String,
    pub password: String,
    pub roles: Vec<Role>,
}

impl UserDetails {
    /// Folds join rows into one record. Returns `None` for an empty result.
    pub fn from_projections(rows: &[UserDetailsProjection]) -> Option<Self> {
        let first = rows.first()?;

        let mut roles: Vec<Role> = Vec::with_capacity(rows.len());
        for row in rows {
            if !roles.iter().any(|r| r.id == row.role_id) {
                roles.push(Role::new(row.role_id, row.authority.clone()));
            }
        }

        Some(Self {
            username: first.username.clone(),
            password: first.password.clone(),
            roles,
        })
    }

    pub fn authorities(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.authority.as_str()).collect()
    }
}
