pub mod gemini;

pub use gemini::GeminiClient;

use crate::tools::ToolDefinition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Conversation roles on the Gemini wire format. There is no system slot in
/// this design; the system instruction rides as the first user turn.
pub const ROLE_USER: &str = "user";
pub const ROLE_MODEL: &str = "model";

/// One role-tagged turn sent to or received from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: ROLE_USER.to_string(),
            parts: vec![Part::text(text)],
        }
    }

    pub fn model_parts(parts: Vec<Part>) -> Self {
        Self {
            role: ROLE_MODEL.to_string(),
            parts,
        }
    }

    pub fn user_parts(parts: Vec<Part>) -> Self {
        Self {
            role: ROLE_USER.to_string(),
            parts,
        }
    }
}

/// A single content part: free text, a model-requested function call, or a
/// function response we feed back. Unknown fields from the API are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn function_response(name: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            function_response: Some(FunctionResponse {
                name: name.into(),
                response: serde_json::json!({ "result": result.into() }),
            }),
            ..Default::default()
        }
    }
}

/// A function call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default = "empty_args")]
    pub args: Value,
}

fn empty_args() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A tool result fed back to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

/// One model invocation's output, split into what the dispatcher needs.
#[derive(Debug, Clone)]
pub struct ModelReply {
    /// The model's own content parts, replayed verbatim into the history.
    pub parts: Vec<Part>,
    /// Concatenated free text.
    pub text: String,
    /// Zero or more requested function calls, in request order.
    pub function_calls: Vec<FunctionCall>,
}

impl ModelReply {
    /// Derive a reply from raw model content parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        let text = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<String>();
        let function_calls = parts
            .iter()
            .filter_map(|p| p.function_call.clone())
            .collect();
        Self {
            parts,
            text,
            function_calls,
        }
    }
}

/// The model seam. The production implementation is [`GeminiClient`]; tests
/// script replies through a fake.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(
        &self,
        contents: &[Content],
        tools: &[ToolDefinition],
    ) -> Result<ModelReply, String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_part_serialization_skips_empty_fields() {
        let part = Part::text("hello");
        let v = serde_json::to_value(&part).unwrap();
        assert_eq!(v, json!({ "text": "hello" }));
    }

    #[test]
    fn test_function_call_defaults_missing_args() {
        let fc: FunctionCall = serde_json::from_value(json!({ "name": "search" })).unwrap();
        assert_eq!(fc.name, "search");
        assert!(fc.args.is_object());
    }

    #[test]
    fn test_reply_from_parts_splits_text_and_calls() {
        let parts = vec![
            Part::text("let me look"),
            Part {
                function_call: Some(FunctionCall {
                    name: "search".to_string(),
                    args: json!({ "query": "oracle" }),
                }),
                ..Default::default()
            },
        ];
        let reply = ModelReply::from_parts(parts);
        assert_eq!(reply.text, "let me look");
        assert_eq!(reply.function_calls.len(), 1);
        assert_eq!(reply.function_calls[0].name, "search");
        assert_eq!(reply.parts.len(), 2);
    }

    #[test]
    fn test_function_response_shape() {
        let part = Part::function_response("search", "No results found.");
        let v = serde_json::to_value(&part).unwrap();
        assert_eq!(
            v,
            json!({
                "functionResponse": {
                    "name": "search",
                    "response": { "result": "No results found." }
                }
            })
        );
    }
}
