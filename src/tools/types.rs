//! Shared types for the tool system.

use crate::db::Database;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Declaration of a tool as exposed to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

impl ToolDefinition {
    /// Convert to the Gemini functionDeclarations entry format.
    pub fn to_function_declaration(&self) -> Value {
        let properties: serde_json::Map<String, Value> = self
            .input_schema
            .properties
            .iter()
            .map(|(name, prop)| {
                (
                    name.clone(),
                    serde_json::json!({
                        "type": prop.schema_type,
                        "description": prop.description,
                    }),
                )
            })
            .collect();

        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "OBJECT",
                "properties": properties,
                "required": self.input_schema.required,
            },
        })
    }
}

/// Parameter schema for a tool. BTreeMap keeps declaration order stable
/// across requests.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInputSchema {
    pub properties: BTreeMap<String, PropertySchema>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertySchema {
    /// Gemini schema type tag: "STRING" or "NUMBER".
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
}

impl PropertySchema {
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            schema_type: "STRING".to_string(),
            description: description.into(),
        }
    }

    pub fn number(description: impl Into<String>) -> Self {
        Self {
            schema_type: "NUMBER".to_string(),
            description: description.into(),
        }
    }
}

/// Request-scoped context handed to every tool execution.
#[derive(Clone)]
pub struct ToolContext {
    pub db: Arc<Database>,
    /// Authenticated caller; every read and insert is scoped to this user.
    pub user_id: String,
    /// Current UTC date, used as the fallback for missing date arguments.
    pub today: NaiveDate,
}

/// Outcome of a single tool execution. Errors stay local to the call; the
/// dispatcher narrates them back to the model as "Error: <message>".
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub success: bool,
    pub content: String,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            content: message.into(),
        }
    }

    /// The string fed back to the model as this call's result.
    pub fn into_result_text(self) -> String {
        if self.success {
            self.content
        } else {
            format!("Error: {}", self.content)
        }
    }
}
