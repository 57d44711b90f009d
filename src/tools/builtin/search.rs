//! Keyword search across notes, work logs, customers, plans, and achievements.

use crate::tools::builtin::truncate_chars;
use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Matches per table.
const PER_TABLE_LIMIT: i64 = 5;

pub struct SearchTool {
    definition: ToolDefinition,
}

impl SearchTool {
    pub fn new() -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            "query".to_string(),
            PropertySchema::string("Search query (keyword to match)"),
        );

        SearchTool {
            definition: ToolDefinition {
                name: "search".to_string(),
                description: "Search by keyword across notes, work logs, customers, plans, and \
                              achievements. Use when user wants to find items containing a \
                              specific word or phrase."
                    .to_string(),
                input_schema: ToolInputSchema {
                    properties,
                    required: vec!["query".to_string()],
                },
            },
        }
    }
}

impl Default for SearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: Option<String>,
}

#[async_trait]
impl Tool for SearchTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: SearchParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };
        let query = params.query.unwrap_or_default().trim().to_string();

        let db = &context.db;
        let user_id = &context.user_id;

        // Notes are matched on title and body independently, deduplicated by
        // id inside search_notes. Plans only contribute a match count.
        let notes = db.search_notes(user_id, &query, PER_TABLE_LIMIT);
        let work_logs = db.search_work_logs(user_id, &query, PER_TABLE_LIMIT);
        let customers = db.search_customers(user_id, &query, PER_TABLE_LIMIT);
        let plans = db.search_daily_plans(user_id, &query, PER_TABLE_LIMIT);
        let achievements = db.search_achievements(user_id, &query, PER_TABLE_LIMIT);

        let (notes, work_logs, customers, plans, achievements) =
            match (notes, work_logs, customers, plans, achievements) {
                (Ok(n), Ok(w), Ok(c), Ok(p), Ok(a)) => (n, w, c, p, a),
                (Err(e), ..)
                | (_, Err(e), ..)
                | (_, _, Err(e), ..)
                | (_, _, _, Err(e), _)
                | (_, _, _, _, Err(e)) => return ToolResult::error(e.to_string()),
            };

        let mut lines: Vec<String> = Vec::new();
        if !notes.is_empty() {
            let items: Vec<String> = notes.iter().map(|n| format!("- {}", n.title)).collect();
            lines.push(format!("Notes:\n{}", items.join("\n")));
        }
        if !work_logs.is_empty() {
            let items: Vec<String> = work_logs
                .iter()
                .map(|w| format!("- {}: {}", w.date, truncate_chars(&w.summary, 80)))
                .collect();
            lines.push(format!("Work logs:\n{}", items.join("\n")));
        }
        if !customers.is_empty() {
            let items: Vec<String> = customers.iter().map(|c| format!("- {}", c.name)).collect();
            lines.push(format!("Customers:\n{}", items.join("\n")));
        }
        if !plans.is_empty() {
            lines.push(format!("Plans: {} matching entries found", plans.len()));
        }
        if !achievements.is_empty() {
            let items: Vec<String> = achievements
                .iter()
                .map(|a| {
                    format!(
                        "- {} ({})",
                        a.custom_title.as_deref().unwrap_or(""),
                        a.earned_at
                    )
                })
                .collect();
            lines.push(format!("Achievements:\n{}", items.join("\n")));
        }

        if lines.is_empty() {
            ToolResult::success("No results found.")
        } else {
            ToolResult::success(lines.join("\n\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::test_db;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Arc;

    fn context() -> (tempfile::TempDir, ToolContext) {
        let (dir, db) = test_db();
        let profile = db.create_profile("a@example.com", "pw").unwrap();
        let ctx = ToolContext {
            db: Arc::new(db),
            user_id: profile.id,
            today: Utc::now().date_naive(),
        };
        (dir, ctx)
    }

    #[tokio::test]
    async fn test_sections_for_matching_tables() {
        let (_dir, ctx) = context();
        ctx.db
            .insert_note(&ctx.user_id, "Oracle certification plan", None, None)
            .unwrap();
        ctx.db
            .insert_work_log(&ctx.user_id, "2026-08-29", "studied for oracle exam", None)
            .unwrap();
        ctx.db
            .insert_milestone(&ctx.user_id, "Oracle Cloud Architect", None, "2026-08-01")
            .unwrap();

        let result = SearchTool::new()
            .execute(json!({ "query": "oracle" }), &ctx)
            .await;
        assert!(result.success);

        let sections: Vec<&str> = result.content.split("\n\n").collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[0].starts_with("Notes:\n- Oracle certification plan"));
        assert!(sections[1].starts_with("Work logs:\n- 2026-08-29: studied for oracle exam"));
        assert!(sections[2].starts_with("Achievements:\n- Oracle Cloud Architect (2026-08-01)"));
    }

    #[tokio::test]
    async fn test_plans_section_reports_count_only() {
        let (_dir, ctx) = context();
        ctx.db
            .insert_daily_plan(&ctx.user_id, "2026-08-30", Some("prep oracle demo"), None)
            .unwrap();
        ctx.db
            .insert_daily_plan(&ctx.user_id, "2026-08-31", Some("oracle follow-up"), None)
            .unwrap();

        let result = SearchTool::new()
            .execute(json!({ "query": "oracle" }), &ctx)
            .await;
        assert_eq!(result.content, "Plans: 2 matching entries found");
    }

    #[tokio::test]
    async fn test_no_results_message() {
        let (_dir, ctx) = context();
        let result = SearchTool::new()
            .execute(json!({ "query": "nothing" }), &ctx)
            .await;
        assert!(result.success);
        assert_eq!(result.content, "No results found.");
    }

    #[tokio::test]
    async fn test_note_matched_on_both_columns_listed_once() {
        let (_dir, ctx) = context();
        ctx.db
            .insert_note(
                &ctx.user_id,
                "Oracle notes",
                Some("More about oracle"),
                None,
            )
            .unwrap();

        let result = SearchTool::new()
            .execute(json!({ "query": "oracle" }), &ctx)
            .await;
        assert_eq!(result.content.matches("- Oracle notes").count(), 1);
    }

    #[tokio::test]
    async fn test_long_summary_truncated_to_80_chars() {
        let (_dir, ctx) = context();
        let long = "x".repeat(120);
        ctx.db
            .insert_work_log(&ctx.user_id, "2026-08-30", &long, None)
            .unwrap();

        let result = SearchTool::new().execute(json!({ "query": "xx" }), &ctx).await;
        let line = result
            .content
            .lines()
            .find(|l| l.starts_with("- 2026-08-30"))
            .unwrap();
        assert_eq!(line, format!("- 2026-08-30: {}", "x".repeat(80)));
    }
}
