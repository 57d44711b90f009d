use crate::db::Database;
use chrono::Utc;
use rusqlite::{params, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_date: Option<String>,
    pub status: String,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

const GOAL_COLUMNS: &str =
    "id, user_id, title, target_date, status, completed_at, created_at, updated_at";

fn row_to_goal(row: &Row) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        target_date: row.get(3)?,
        status: row.get(4)?,
        completed_at: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Database {
    pub fn create_goal(
        &self,
        user_id: &str,
        title: &str,
        target_date: Option<&str>,
    ) -> SqliteResult<Goal> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO goals (id, user_id, title, target_date, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, 'active', ?5, ?5)",
            params![id, user_id, title, target_date, now],
        )?;
        conn.query_row(
            &format!("SELECT {} FROM goals WHERE id = ?1", GOAL_COLUMNS),
            params![id],
            row_to_goal,
        )
    }

    pub fn list_goals(&self, user_id: &str) -> SqliteResult<Vec<Goal>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM goals WHERE user_id = ?1 ORDER BY created_at DESC",
            GOAL_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_goal)?;
        rows.collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::db::models::test_db;

    #[test]
    fn test_new_goal_starts_active() {
        let (_dir, db) = test_db();
        let p = db.create_profile("a@example.com", "pw").unwrap();
        let goal = db
            .create_goal(&p.id, "Pass the cert exam", Some("2026-12-01"))
            .unwrap();
        assert_eq!(goal.status, "active");
        assert!(goal.completed_at.is_none());
        assert_eq!(db.list_goals(&p.id).unwrap().len(), 1);
    }
}
