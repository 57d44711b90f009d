//! Manager-review summaries covering a date range.

use crate::db::Database;
use chrono::Utc;
use rusqlite::{params, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub id: String,
    pub user_id: String,
    pub period_start: String,
    pub period_end: String,
    pub summary: String,
    pub highlights: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

const REVIEW_COLUMNS: &str =
    "id, user_id, period_start, period_end, summary, highlights, created_at, updated_at";

fn row_to_review(row: &Row) -> rusqlite::Result<ReviewEntry> {
    Ok(ReviewEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        period_start: row.get(2)?,
        period_end: row.get(3)?,
        summary: row.get(4)?,
        highlights: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Database {
    pub fn create_review_entry(
        &self,
        user_id: &str,
        period_start: &str,
        period_end: &str,
        summary: &str,
        highlights: Option<&str>,
    ) -> SqliteResult<ReviewEntry> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO review_entries (id, user_id, period_start, period_end, summary, highlights, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![id, user_id, period_start, period_end, summary, highlights, now],
        )?;
        conn.query_row(
            &format!("SELECT {} FROM review_entries WHERE id = ?1", REVIEW_COLUMNS),
            params![id],
            row_to_review,
        )
    }

    pub fn list_review_entries(&self, user_id: &str) -> SqliteResult<Vec<ReviewEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM review_entries WHERE user_id = ?1 ORDER BY period_end DESC",
            REVIEW_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_review)?;
        rows.collect()
    }
}
