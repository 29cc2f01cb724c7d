//! User Storage
//! Mission: Persist user accounts with SQLite

use crate::auth::models::{Role, User};
use crate::auth::password::hash_password;
use anyhow::Result;
use rusqlite::{params, Connection};
use tracing::info;
use uuid::Uuid;

/// User storage with SQLite backend
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        let role_str: String = row.get(4)?;
        Ok(User {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            role: Role::from_str(&role_str).unwrap_or(Role::User),
        })
    }

    /// Get a user by email
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, password_hash, role
             FROM users WHERE email = ?1",
        )?;

        match stmt.query_row(params![email], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by id
    pub fn find_by_id(&self, user_id: &Uuid) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, password_hash, role
             FROM users WHERE id = ?1",
        )?;

        match stmt.query_row(params![user_id.to_string()], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create a new user. Email uniqueness is enforced by the schema; callers
    /// check for an existing account first to report the duplicate cleanly.
    pub fn create_user(&self, name: &str, email: &str, password_hash: &str, role: Role) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO users (id, name, email, password_hash, role)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                user.name,
                user.email,
                user.password_hash,
                user.role.as_str(),
            ],
        )?;

        info!("✅ Created user: {} ({})", user.email, user.role.as_str());

        Ok(user)
    }

    /// List all users
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt =
            conn.prepare("SELECT id, name, email, password_hash, role FROM users")?;

        let users = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Delete a user by id. Returns false when no such user exists.
    pub fn delete_user(&self, user_id: &Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "DELETE FROM users WHERE id = ?1",
            params![user_id.to_string()],
        )?;

        if rows_affected > 0 {
            info!("🗑️  Deleted user: {}", user_id);
        }

        Ok(rows_affected > 0)
    }

    /// Apply a profile update, each field independently optional.
    ///
    /// Blank name/email/password keep the stored value. A role string that is
    /// not one of the enumerated roles also keeps the stored value, so an
    /// account can never end up outside {admin, user}. A non-blank password
    /// is re-hashed. Returns the updated user, or None when the id is
    /// unknown.
    pub fn update_profile(
        &self,
        user_id: &Uuid,
        name: &str,
        email: &str,
        role: &str,
        password: &str,
    ) -> Result<Option<User>> {
        let Some(current) = self.find_by_id(user_id)? else {
            return Ok(None);
        };

        let name = if name.trim().is_empty() {
            current.name.clone()
        } else {
            name.trim().to_string()
        };
        let email = if email.trim().is_empty() {
            current.email.clone()
        } else {
            email.trim().to_string()
        };
        let role = Role::from_str(role).unwrap_or(current.role.clone());
        let password_hash = if password.is_empty() {
            current.password_hash.clone()
        } else {
            hash_password(password)?
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "UPDATE users SET name = ?2, email = ?3, password_hash = ?4, role = ?5
             WHERE id = ?1",
            params![
                user_id.to_string(),
                name,
                email,
                password_hash,
                role.as_str(),
            ],
        )?;

        info!("Updated profile for user {}", user_id);

        self.find_by_id(user_id)
    }
}
