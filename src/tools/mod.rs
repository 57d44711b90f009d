//! Tool system: the fixed five-tool catalog the chat assistant can call.

pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::{Tool, ToolRegistry};
pub use types::{PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult};

use std::sync::Arc;

/// Create the registry with all built-in tools.
pub fn create_default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(builtin::AddAchievementTool::new()));
    registry.register(Arc::new(builtin::AddWorkLogTool::new()));
    registry.register(Arc::new(builtin::AddNoteTool::new()));
    registry.register(Arc::new(builtin::SearchTool::new()));
    registry.register(Arc::new(builtin::ListNotesTool::new()));
    registry
}
