use crate::db::models::like_pattern;
use crate::db::Database;
use chrono::Utc;
use rusqlite::{params, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub slug: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

const CUSTOMER_COLUMNS: &str = "id, user_id, name, slug, notes, created_at, updated_at";

fn row_to_customer(row: &Row) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        slug: row.get(3)?,
        notes: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl Database {
    pub fn create_customer(
        &self,
        user_id: &str,
        name: &str,
        notes: Option<&str>,
    ) -> SqliteResult<Customer> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO customers (id, user_id, name, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, user_id, name, notes, now],
        )?;
        conn.query_row(
            &format!("SELECT {} FROM customers WHERE id = ?1", CUSTOMER_COLUMNS),
            params![id],
            row_to_customer,
        )
    }

    pub fn list_customers(&self, user_id: &str) -> SqliteResult<Vec<Customer>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM customers WHERE user_id = ?1 ORDER BY created_at DESC",
            CUSTOMER_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_customer)?;
        rows.collect()
    }

    pub fn search_customers(
        &self,
        user_id: &str,
        query: &str,
        limit: i64,
    ) -> SqliteResult<Vec<Customer>> {
        let conn = self.conn.lock().unwrap();
        let pattern = like_pattern(query);
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM customers WHERE user_id = ?1 AND name LIKE ?2 ESCAPE '\\' LIMIT ?3",
            CUSTOMER_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id, pattern, limit], row_to_customer)?;
        rows.collect()
    }
}
