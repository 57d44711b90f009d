//! User accounts with salted SHA-256 password hashes.

use crate::db::Database;
use chrono::Utc;
use rand::RngCore;
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn row_to_profile(row: &Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        display_name: row.get(3)?,
        avatar_url: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const PROFILE_COLUMNS: &str =
    "id, email, password_hash, display_name, avatar_url, created_at, updated_at";

/// Hash a password with the given hex salt. Stored as "salt$hash".
fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

impl Profile {
    pub fn verify_password(&self, password: &str) -> bool {
        match self.password_hash.split_once('$') {
            Some((salt, hash)) => hash_password(password, salt) == hash,
            None => false,
        }
    }
}

impl Database {
    pub fn create_profile(&self, email: &str, password: &str) -> SqliteResult<Profile> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();
        let id = Uuid::new_v4().to_string();

        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = hex::encode(salt_bytes);
        let stored = format!("{}${}", salt, hash_password(password, &salt));

        conn.execute(
            "INSERT INTO profiles (id, email, password_hash, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![id, email, stored, now],
        )?;

        conn.query_row(
            &format!("SELECT {} FROM profiles WHERE id = ?1", PROFILE_COLUMNS),
            params![id],
            row_to_profile,
        )
    }

    pub fn get_profile(&self, user_id: &str) -> SqliteResult<Option<Profile>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            &format!("SELECT {} FROM profiles WHERE id = ?1", PROFILE_COLUMNS),
            params![user_id],
            row_to_profile,
        )
        .optional()
    }

    pub fn get_profile_by_email(&self, email: &str) -> SqliteResult<Option<Profile>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            &format!("SELECT {} FROM profiles WHERE email = ?1", PROFILE_COLUMNS),
            params![email],
            row_to_profile,
        )
        .optional()
    }

    pub fn update_profile(
        &self,
        user_id: &str,
        display_name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "UPDATE profiles SET display_name = ?1, avatar_url = ?2, updated_at = ?3
             WHERE id = ?4",
            params![display_name, avatar_url, now, user_id],
        )?;
        Ok(())
    }
}
