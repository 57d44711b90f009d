use crate::db::models::like_pattern;
use crate::db::Database;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub content: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

const PLAN_COLUMNS: &str = "id, user_id, date, content, notes, created_at, updated_at";

fn row_to_plan(row: &Row) -> rusqlite::Result<DailyPlan> {
    Ok(DailyPlan {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: row.get(2)?,
        content: row.get(3)?,
        notes: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl Database {
    pub fn insert_daily_plan(
        &self,
        user_id: &str,
        date: &str,
        content: Option<&str>,
        notes: Option<&str>,
    ) -> SqliteResult<DailyPlan> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO daily_plans (id, user_id, date, content, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![id, user_id, date, content, notes, now],
        )?;
        conn.query_row(
            &format!("SELECT {} FROM daily_plans WHERE id = ?1", PLAN_COLUMNS),
            params![id],
            row_to_plan,
        )
    }

    /// Update an existing plan, scoped to its owner. Returns None when the
    /// plan does not exist or belongs to another user.
    pub fn update_daily_plan(
        &self,
        plan_id: &str,
        user_id: &str,
        content: Option<&str>,
        notes: Option<&str>,
    ) -> SqliteResult<Option<DailyPlan>> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();
        let changed = conn.execute(
            "UPDATE daily_plans SET content = ?1, notes = ?2, updated_at = ?3
             WHERE id = ?4 AND user_id = ?5",
            params![content, notes, now, plan_id, user_id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        conn.query_row(
            &format!("SELECT {} FROM daily_plans WHERE id = ?1", PLAN_COLUMNS),
            params![plan_id],
            row_to_plan,
        )
        .optional()
    }

    pub fn list_daily_plans(&self, user_id: &str) -> SqliteResult<Vec<DailyPlan>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM daily_plans WHERE user_id = ?1 ORDER BY date DESC",
            PLAN_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_plan)?;
        rows.collect()
    }

    /// Most recent plans first, capped at `limit`. Used for review summaries.
    pub fn recent_daily_plans(&self, user_id: &str, limit: i64) -> SqliteResult<Vec<DailyPlan>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM daily_plans WHERE user_id = ?1 ORDER BY date DESC LIMIT ?2",
            PLAN_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id, limit], row_to_plan)?;
        rows.collect()
    }

    /// Count of plans whose content matches the query; the chat search only
    /// reports a match count for plans, never their contents.
    pub fn search_daily_plans(
        &self,
        user_id: &str,
        query: &str,
        limit: i64,
    ) -> SqliteResult<Vec<DailyPlan>> {
        let conn = self.conn.lock().unwrap();
        let pattern = like_pattern(query);
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM daily_plans WHERE user_id = ?1 AND content LIKE ?2 ESCAPE '\\' LIMIT ?3",
            PLAN_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id, pattern, limit], row_to_plan)?;
        rows.collect()
    }
}
