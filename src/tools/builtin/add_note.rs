//! Tool for adding a note.

use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct AddNoteTool {
    definition: ToolDefinition,
}

impl AddNoteTool {
    pub fn new() -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("title".to_string(), PropertySchema::string("Note title"));
        properties.insert(
            "body".to_string(),
            PropertySchema::string("Note content (optional)"),
        );

        AddNoteTool {
            definition: ToolDefinition {
                name: "add_note".to_string(),
                description: "Add a new note (meeting notes, ideas, customer notes)".to_string(),
                input_schema: ToolInputSchema {
                    properties,
                    required: vec!["title".to_string()],
                },
            },
        }
    }
}

impl Default for AddNoteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct AddNoteParams {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

#[async_trait]
impl Tool for AddNoteTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: AddNoteParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        let title = params.title.unwrap_or_default();
        match context
            .db
            .insert_note(&context.user_id, &title, params.body.as_deref(), None)
        {
            Ok(_) => ToolResult::success(format!("Added note: {}", title)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}
