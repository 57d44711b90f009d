//! Notes: inserts, recency listing, and two-column keyword search.

use crate::db::models::like_pattern;
use crate::db::Database;
use chrono::Utc;
use rusqlite::{params, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub user_id: String,
    pub customer_id: Option<String>,
    pub title: String,
    pub body: Option<String>,
    pub source: String,
    pub created_at: String,
    pub updated_at: String,
}

const NOTE_COLUMNS: &str = "id, user_id, customer_id, title, body, source, created_at, updated_at";

fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        user_id: row.get(1)?,
        customer_id: row.get(2)?,
        title: row.get(3)?,
        body: row.get(4)?,
        source: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Database {
    pub fn insert_note(
        &self,
        user_id: &str,
        title: &str,
        body: Option<&str>,
        customer_id: Option<&str>,
    ) -> SqliteResult<Note> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO notes (id, user_id, customer_id, title, body, source, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 'manual', ?6, ?6)",
            params![id, user_id, customer_id, title, body, now],
        )?;
        conn.query_row(
            &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
            params![id],
            row_to_note,
        )
    }

    /// Most-recently-updated first.
    pub fn list_notes(&self, user_id: &str, limit: i64) -> SqliteResult<Vec<Note>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM notes WHERE user_id = ?1 ORDER BY updated_at DESC LIMIT ?2",
            NOTE_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id, limit], row_to_note)?;
        rows.collect()
    }

    /// Substring match against title and body independently (capped at
    /// `per_column_limit` each), deduplicated by id. Title matches come
    /// first, body-only matches after.
    pub fn search_notes(
        &self,
        user_id: &str,
        query: &str,
        per_column_limit: i64,
    ) -> SqliteResult<Vec<Note>> {
        let conn = self.conn.lock().unwrap();
        let pattern = like_pattern(query);

        let mut results = Vec::new();
        let mut seen = HashSet::new();
        for column in ["title", "body"] {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM notes WHERE user_id = ?1 AND {} LIKE ?2 ESCAPE '\\' LIMIT ?3",
                NOTE_COLUMNS, column
            ))?;
            let rows = stmt.query_map(params![user_id, pattern, per_column_limit], row_to_note)?;
            for note in rows {
                let note = note?;
                if seen.insert(note.id.clone()) {
                    results.push(note);
                }
            }
        }
        Ok(results)
    }
}
