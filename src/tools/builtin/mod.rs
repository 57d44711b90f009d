pub mod add_achievement;
pub mod add_note;
pub mod add_work_log;
pub mod list_notes;
pub mod search;

pub use add_achievement::AddAchievementTool;
pub use add_note::AddNoteTool;
pub use add_work_log::AddWorkLogTool;
pub use list_notes::ListNotesTool;
pub use search::SearchTool;

/// Truncate to at most `max` characters, respecting char boundaries.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
