//! Tool for adding a milestone achievement.

use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct AddAchievementTool {
    definition: ToolDefinition,
}

impl AddAchievementTool {
    pub fn new() -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            "title".to_string(),
            PropertySchema::string("Achievement title (e.g. Oracle Cloud Architect)"),
        );
        properties.insert(
            "description".to_string(),
            PropertySchema::string("Optional description"),
        );
        properties.insert(
            "earned_at".to_string(),
            PropertySchema::string("Date earned in YYYY-MM-DD format"),
        );

        AddAchievementTool {
            definition: ToolDefinition {
                name: "add_achievement".to_string(),
                description: "Add a new milestone achievement (custom accomplishment, \
                              certification, or badge earned)"
                    .to_string(),
                input_schema: ToolInputSchema {
                    properties,
                    required: vec!["title".to_string(), "earned_at".to_string()],
                },
            },
        }
    }
}

impl Default for AddAchievementTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct AddAchievementParams {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    earned_at: Option<String>,
}

#[async_trait]
impl Tool for AddAchievementTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: AddAchievementParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        // Safe fallbacks: missing title -> empty string, missing date -> today
        let title = params.title.unwrap_or_default();
        let earned_at = params
            .earned_at
            .unwrap_or_else(|| context.today.to_string());

        match context.db.insert_milestone(
            &context.user_id,
            &title,
            params.description.as_deref(),
            &earned_at,
        ) {
            Ok(_) => ToolResult::success(format!("Added achievement: {}", title)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}
