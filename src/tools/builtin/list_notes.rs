//! Tool for listing all notes, most recently updated first.

use crate::tools::builtin::truncate_chars;
use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 100;

pub struct ListNotesTool {
    definition: ToolDefinition,
}

impl ListNotesTool {
    pub fn new() -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            "limit".to_string(),
            PropertySchema::number("Max number of notes to return (default 50)"),
        );

        ListNotesTool {
            definition: ToolDefinition {
                name: "list_notes".to_string(),
                description: "List ALL notes for the user. Use when user asks to list notes, \
                              show all notes, what notes do I have, display my notes, etc. \
                              Do NOT use search for this."
                    .to_string(),
                input_schema: ToolInputSchema {
                    properties,
                    required: vec![],
                },
            },
        }
    }
}

impl Default for ListNotesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct ListNotesParams {
    #[serde(default)]
    limit: Option<f64>,
}

#[async_trait]
impl Tool for ListNotesTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: ListNotesParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        // Zero counts as unset, then clamp to [1, 100]
        let limit = params
            .limit
            .map(|l| l as i64)
            .filter(|l| *l != 0)
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);

        let notes = match context.db.list_notes(&context.user_id, limit) {
            Ok(n) => n,
            Err(e) => return ToolResult::error(e.to_string()),
        };

        if notes.is_empty() {
            return ToolResult::success("No notes found.");
        }

        let items: Vec<String> = notes
            .iter()
            .map(|n| {
                let mut line = format!("- {}", n.title);
                if let Some(body) = n.body.as_deref().filter(|b| !b.is_empty()) {
                    line.push_str(&format!(" — {}", truncate_chars(body, 60)));
                    if body.chars().count() > 60 {
                        line.push('…');
                    }
                }
                line
            })
            .collect();

        ToolResult::success(format!("Notes:\n{}", items.join("\n")))
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
    async fn test_lists_notes_with_body_preview() {
        let (_dir, ctx) = context();
        ctx.db
            .insert_note(&ctx.user_id, "Short", Some("tiny body"), None)
            .unwrap();

        let result = ListNotesTool::new().execute(json!({}), &ctx).await;
        assert!(result.success);
        assert_eq!(result.content, "Notes:\n- Short — tiny body");
    }

    #[tokio::test]
    async fn test_long_body_gets_ellipsis() {
        let (_dir, ctx) = context();
        let body = "b".repeat(90);
        ctx.db
            .insert_note(&ctx.user_id, "Long", Some(&body), None)
            .unwrap();

        let result = ListNotesTool::new().execute(json!({}), &ctx).await;
        assert_eq!(
            result.content,
            format!("Notes:\n- Long — {}…", "b".repeat(60))
        );
    }

    #[tokio::test]
    async fn test_empty_message() {
        let (_dir, ctx) = context();
        let result = ListNotesTool::new().execute(json!({}), &ctx).await;
        assert_eq!(result.content, "No notes found.");
    }

    #[tokio::test]
    async fn test_limit_clamped_and_zero_means_default() {
        let (_dir, ctx) = context();
        for i in 0..3 {
            ctx.db
                .insert_note(&ctx.user_id, &format!("n{}", i), None, None)
                .unwrap();
        }

        // limit 1 -> one note
        let result = ListNotesTool::new()
            .execute(json!({ "limit": 1 }), &ctx)
            .await;
        assert_eq!(result.content.lines().count(), 2); // header + one bullet

        // limit 0 is treated as unset (default 50)
        let result = ListNotesTool::new()
            .execute(json!({ "limit": 0 }), &ctx)
            .await;
        assert_eq!(result.content.lines().count(), 4);

        // negative limits clamp up to 1
        let result = ListNotesTool::new()
            .execute(json!({ "limit": -7 }), &ctx)
            .await;
        assert_eq!(result.content.lines().count(), 2);
    }

    #[test]
    fn test_definition_has_no_required_params() {
        let def = ListNotesTool::new().definition();
        assert_eq!(def.name, "list_notes");
        assert!(def.input_schema.required.is_empty());
    }
}
