//! Tool for adding a work-log entry.

use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct AddWorkLogTool {
    definition: ToolDefinition,
}

impl AddWorkLogTool {
    pub fn new() -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            "date".to_string(),
            PropertySchema::string("Date in YYYY-MM-DD format"),
        );
        properties.insert(
            "summary".to_string(),
            PropertySchema::string("What you did"),
        );
        properties.insert(
            "minutes".to_string(),
            PropertySchema::number("Optional time spent in minutes"),
        );

        AddWorkLogTool {
            definition: ToolDefinition {
                name: "add_work_log".to_string(),
                description: "Add a work log entry (what you did on a given date)".to_string(),
                input_schema: ToolInputSchema {
                    properties,
                    required: vec!["date".to_string(), "summary".to_string()],
                },
            },
        }
    }
}

impl Default for AddWorkLogTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct AddWorkLogParams {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    minutes: Option<f64>,
}

#[async_trait]
impl Tool for AddWorkLogTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: AddWorkLogParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        let date = params.date.unwrap_or_else(|| context.today.to_string());
        let summary = params.summary.unwrap_or_default();
        let minutes = params.minutes.map(|m| m as i64);

        match context
            .db
            .insert_work_log(&context.user_id, &date, &summary, minutes)
        {
            Ok(_) => ToolResult::success(format!("Added work log: {}", summary)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}
