//! Work-log entries: what was done on a given date.

use crate::db::models::like_pattern;
use crate::db::Database;
use chrono::Utc;
use rusqlite::{params, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkLog {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub summary: String,
    pub customer_id: Option<String>,
    pub minutes: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

const WORK_LOG_COLUMNS: &str =
    "id, user_id, date, summary, customer_id, minutes, created_at, updated_at";

fn row_to_work_log(row: &Row) -> rusqlite::Result<WorkLog> {
    Ok(WorkLog {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: row.get(2)?,
        summary: row.get(3)?,
        customer_id: row.get(4)?,
        minutes: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Database {
    pub fn insert_work_log(
        &self,
        user_id: &str,
        date: &str,
        summary: &str,
        minutes: Option<i64>,
    ) -> SqliteResult<WorkLog> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO work_logs (id, user_id, date, summary, minutes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![id, user_id, date, summary, minutes, now],
        )?;
        conn.query_row(
            &format!("SELECT {} FROM work_logs WHERE id = ?1", WORK_LOG_COLUMNS),
            params![id],
            row_to_work_log,
        )
    }

    pub fn list_work_logs(&self, user_id: &str) -> SqliteResult<Vec<WorkLog>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM work_logs WHERE user_id = ?1 ORDER BY date DESC",
            WORK_LOG_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_work_log)?;
        rows.collect()
    }

    /// Most recent entries first, capped at `limit`. Used for review summaries.
    pub fn recent_work_logs(&self, user_id: &str, limit: i64) -> SqliteResult<Vec<WorkLog>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM work_logs WHERE user_id = ?1 ORDER BY date DESC LIMIT ?2",
            WORK_LOG_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id, limit], row_to_work_log)?;
        rows.collect()
    }

    pub fn search_work_logs(
        &self,
        user_id: &str,
        query: &str,
        limit: i64,
    ) -> SqliteResult<Vec<WorkLog>> {
        let conn = self.conn.lock().unwrap();
        let pattern = like_pattern(query);
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM work_logs WHERE user_id = ?1 AND summary LIKE ?2 ESCAPE '\\' LIMIT ?3",
            WORK_LOG_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id, pattern, limit], row_to_work_log)?;
        rows.collect()
    }
}
