//! Bearer-token auth sessions.

use crate::db::Database;
use chrono::{Duration, Utc};
use rand::RngCore;
use rusqlite::{params, OptionalExtension, Result as SqliteResult};

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    pub expires_at: String,
}

impl Database {
    /// Create a session for the user, valid for `ttl_days`.
    pub fn create_session(&self, user_id: &str, ttl_days: i64) -> SqliteResult<AuthSession> {
        let conn = self.conn.lock().unwrap();
        let mut token_bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut token_bytes);
        let token = hex::encode(token_bytes);

        let now = Utc::now();
        let expires_at = (now + Duration::days(ttl_days)).to_rfc3339();
        conn.execute(
            "INSERT INTO auth_sessions (token, user_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![token, user_id, now.to_rfc3339(), expires_at],
        )?;

        Ok(AuthSession {
            token,
            user_id: user_id.to_string(),
            expires_at,
        })
    }

    /// Look up a session token. Returns None when unknown or expired;
    /// expired rows are deleted on sight so the table does not grow
    /// unbounded.
    pub fn validate_session(&self, token: &str) -> SqliteResult<Option<AuthSession>> {
        let conn = self.conn.lock().unwrap();
        let session = conn
            .query_row(
                "SELECT token, user_id, expires_at FROM auth_sessions WHERE token = ?1",
                params![token],
                |row| {
                    Ok(AuthSession {
                        token: row.get(0)?,
                        user_id: row.get(1)?,
                        expires_at: row.get(2)?,
                    })
                },
            )
            .optional()?;

        let session = match session {
            Some(s) => s,
            None => return Ok(None),
        };

        let live = chrono::DateTime::parse_from_rfc3339(&session.expires_at)
            .map(|exp| exp > Utc::now())
            .unwrap_or(false);
        if live {
            Ok(Some(session))
        } else {
            conn.execute(
                "DELETE FROM auth_sessions WHERE token = ?1",
                params![session.token],
            )?;
            Ok(None)
        }
    }

    pub fn delete_session(&self, token: &str) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM auth_sessions WHERE token = ?1", params![token])?;
        Ok(())
    }
}
