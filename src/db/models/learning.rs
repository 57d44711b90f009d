use crate::db::Database;
use chrono::Utc;
use rusqlite::{params, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningProgress {
    pub id: String,
    pub user_id: String,
    pub source: String,
    pub title: String,
    pub external_url: Option<String>,
    pub progress_percent: i64,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

const LEARNING_COLUMNS: &str =
    "id, user_id, source, title, external_url, progress_percent, completed_at, created_at, updated_at";

fn row_to_learning(row: &Row) -> rusqlite::Result<LearningProgress> {
    Ok(LearningProgress {
        id: row.get(0)?,
        user_id: row.get(1)?,
        source: row.get(2)?,
        title: row.get(3)?,
        external_url: row.get(4)?,
        progress_percent: row.get(5)?,
        completed_at: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl Database {
    pub fn create_learning_progress(
        &self,
        user_id: &str,
        source: &str,
        title: &str,
        progress_percent: i64,
    ) -> SqliteResult<LearningProgress> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO learning_progress (id, user_id, source, title, progress_percent, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![id, user_id, source, title, progress_percent, now],
        )?;
        conn.query_row(
            &format!("SELECT {} FROM learning_progress WHERE id = ?1", LEARNING_COLUMNS),
            params![id],
            row_to_learning,
        )
    }

    pub fn list_learning_progress(&self, user_id: &str) -> SqliteResult<Vec<LearningProgress>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM learning_progress WHERE user_id = ?1 ORDER BY created_at DESC",
            LEARNING_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_learning)?;
        rows.collect()
    }
}
