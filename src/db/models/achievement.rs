use crate::db::models::like_pattern;
use crate::db::Database;
use chrono::Utc;
use rusqlite::{params, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub custom_title: Option<String>,
    pub custom_description: Option<String>,
    pub earned_at: String,
    pub credential_url: Option<String>,
    pub created_at: String,
}

const ACHIEVEMENT_COLUMNS: &str =
    "id, user_id, type, custom_title, custom_description, earned_at, credential_url, created_at";

fn row_to_achievement(row: &Row) -> rusqlite::Result<Achievement> {
    Ok(Achievement {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: row.get(2)?,
        custom_title: row.get(3)?,
        custom_description: row.get(4)?,
        earned_at: row.get(5)?,
        credential_url: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl Database {
    /// Insert a milestone-type achievement (the kind the assistant adds).
    pub fn insert_milestone(
        &self,
        user_id: &str,
        title: &str,
        description: Option<&str>,
        earned_at: &str,
    ) -> SqliteResult<Achievement> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO achievements (id, user_id, type, custom_title, custom_description, earned_at, created_at)
             VALUES (?1, ?2, 'milestone', ?3, ?4, ?5, ?6)",
            params![id, user_id, title, description, earned_at, now],
        )?;
        conn.query_row(
            &format!("SELECT {} FROM achievements WHERE id = ?1", ACHIEVEMENT_COLUMNS),
            params![id],
            row_to_achievement,
        )
    }

    pub fn list_achievements(&self, user_id: &str) -> SqliteResult<Vec<Achievement>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM achievements WHERE user_id = ?1 ORDER BY earned_at DESC",
            ACHIEVEMENT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_achievement)?;
        rows.collect()
    }

    pub fn search_achievements(
        &self,
        user_id: &str,
        query: &str,
        limit: i64,
    ) -> SqliteResult<Vec<Achievement>> {
        let conn = self.conn.lock().unwrap();
        let pattern = like_pattern(query);
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM achievements WHERE user_id = ?1 AND custom_title LIKE ?2 ESCAPE '\\' LIMIT ?3",
            ACHIEVEMENT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id, pattern, limit], row_to_achievement)?;
        rows.collect()
    }
}
