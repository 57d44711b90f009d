//! Conversational tool dispatcher.
//!
//! Alternates between calling the model and executing any tool calls it
//! requests, bounded by a fixed turn ceiling. Conversation state is supplied
//! fresh by the client on every request; nothing survives the handler.

pub mod format;
pub mod prompt;

use crate::ai::{ChatModel, Content, FunctionCall, Part};
use crate::db::Database;
use crate::tools::{ToolContext, ToolRegistry, ToolResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Maximum number of dispatch rounds per request. The only circuit breaker
/// against model/tool back-and-forth.
pub const MAX_TOOL_TURNS: usize = 5;

/// Reply when the model ends with no text at all.
const FALLBACK_REPLY: &str = "Done.";

/// One client-supplied conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// Convert the client conversation into the content list for the model call:
/// the system instruction as a synthetic first user turn, then one turn per
/// non-empty message with "assistant" remapped to "model". Pure; ordering
/// preserved.
pub fn assemble_contents(messages: &[ChatMessage], today: chrono::NaiveDate) -> Vec<Content> {
    let mut contents = Vec::with_capacity(messages.len() + 1);
    contents.push(Content::user_text(prompt::system_prompt(today)));
    for message in messages {
        if message.content.is_empty() {
            continue;
        }
        let role = if message.role == "assistant" {
            crate::ai::ROLE_MODEL
        } else {
            crate::ai::ROLE_USER
        };
        contents.push(Content {
            role: role.to_string(),
            parts: vec![Part::text(message.content.clone())],
        });
    }
    contents
}

pub struct ChatDispatcher {
    db: Arc<Database>,
    registry: Arc<ToolRegistry>,
}

impl ChatDispatcher {
    pub fn new(db: Arc<Database>, registry: Arc<ToolRegistry>) -> Self {
        Self { db, registry }
    }

    /// Run the full request: assemble, loop model/tool rounds, and produce
    /// the assistant's final text. Model-call failures abort the request;
    /// per-tool failures are narrated back into the conversation.
    pub async fn dispatch(
        &self,
        model: &dyn ChatModel,
        user_id: &str,
        messages: &[ChatMessage],
    ) -> Result<String, String> {
        let today = Utc::now().date_naive();
        let mut contents = assemble_contents(messages, today);
        let tools = self.registry.definitions();

        let context = ToolContext {
            db: Arc::clone(&self.db),
            user_id: user_id.to_string(),
            today,
        };

        let mut reply = model.generate(&contents, &tools).await?;
        let mut turns = 0;

        while !reply.function_calls.is_empty() && turns < MAX_TOOL_TURNS {
            turns += 1;

            // Replay the model's own turn (with its call parts) into history
            if !reply.parts.is_empty() {
                contents.push(Content::model_parts(reply.parts.clone()));
            }

            let calls = std::mem::take(&mut reply.function_calls);
            let mut results = Vec::with_capacity(calls.len());
            for call in &calls {
                results.push(self.execute_call(call, &context).await);
            }

            // Single successful pure-read round: format the raw result
            // directly and skip the second model round trip. A failed read
            // stays in the loop so the model can react to the error.
            if calls.len() == 1 && results[0].success && format::is_shortcut_tool(&calls[0].name) {
                log::info!("Chat shortcut reply for tool '{}'", calls[0].name);
                return Ok(format::shortcut_response(
                    &calls[0].name,
                    &calls[0].args,
                    &results[0].content,
                ));
            }

            // One synthetic user turn bundling all results, in request order
            let responses = calls
                .iter()
                .zip(results)
                .map(|(call, result)| {
                    Part::function_response(call.name.clone(), result.into_result_text())
                })
                .collect();
            contents.push(Content::user_parts(responses));

            reply = model.generate(&contents, &tools).await?;
        }

        let text = reply.text.trim();
        if text.is_empty() {
            Ok(FALLBACK_REPLY.to_string())
        } else {
            Ok(text.to_string())
        }
    }

    /// Execute one call; failures never abort sibling calls, they are
    /// rendered as "Error: <msg>" result strings when fed back.
    async fn execute_call(&self, call: &FunctionCall, context: &ToolContext) -> ToolResult {
        log::info!("Chat tool call '{}'", call.name);
        let result = match self.registry.get(&call.name) {
            Some(tool) => tool.execute(call.args.clone(), context).await,
            None => ToolResult::success(format!("Unknown tool: {}", call.name)),
        };
        if !result.success {
            log::warn!("Tool '{}' failed: {}", call.name, result.content);
        }
        result
    }
}
