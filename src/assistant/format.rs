//! Shortcut Responder formatting.
//!
//! Takes the raw tool result of `search` / `list_notes` (newline-delimited
//! "Header:\n- item" blocks) and turns it into a Markdown answer with bold
//! section headers, skipping the second model round trip entirely. This is a
//! pure formatting transform; it never re-fetches data.

use serde_json::Value;

pub const SEARCH_TOOL: &str = "search";
pub const LIST_NOTES_TOOL: &str = "list_notes";

/// True when a round of exactly one call to a pure-read tool should return
/// directly instead of going back to the model.
pub fn is_shortcut_tool(name: &str) -> bool {
    name == SEARCH_TOOL || name == LIST_NOTES_TOOL
}

/// Format the final answer for a shortcut round.
pub fn shortcut_response(tool_name: &str, args: &Value, raw_result: &str) -> String {
    match tool_name {
        SEARCH_TOOL => {
            let query = args
                .get("query")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .trim();
            if raw_result == "No results found." {
                format!("No results found for **\"{}\"**.", query)
            } else {
                format!(
                    "Here's what I found for **\"{}\"**:\n\n{}",
                    query,
                    bold_sections(raw_result)
                )
            }
        }
        LIST_NOTES_TOOL => {
            if raw_result == "No notes found." {
                "You have no notes yet.".to_string()
            } else {
                let count = raw_result.lines().filter(|l| l.starts_with("- ")).count();
                format!(
                    "Here are your **{}** note(s):\n\n{}",
                    count,
                    bold_sections(raw_result)
                )
            }
        }
        _ => raw_result.to_string(),
    }
}

/// Rewrite each "Header:\n- item" block so the header line (minus a trailing
/// colon) is bold.
fn bold_sections(raw: &str) -> String {
    raw.split("\n\n")
        .map(|block| {
            let mut lines = block.splitn(2, '\n');
            let header = lines.next().unwrap_or("").trim_end_matches(':');
            let rest = lines.next().unwrap_or("");
            format!("**{}**\n{}", header, rest)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_formatting() {
        let raw = "Notes:\n- Oracle plan\n- Oracle follow-up\n\nAchievements:\n- Oracle Cloud Architect (2026-08-01)";
        let out = shortcut_response(SEARCH_TOOL, &json!({ "query": "oracle" }), raw);
        assert_eq!(
            out,
            "Here's what I found for **\"oracle\"**:\n\n\
             **Notes**\n- Oracle plan\n- Oracle follow-up\n\n\
             **Achievements**\n- Oracle Cloud Architect (2026-08-01)"
        );
    }

    #[test]
    fn test_search_no_results() {
        let out = shortcut_response(
            SEARCH_TOOL,
            &json!({ "query": "  widgets  " }),
            "No results found.",
        );
        assert_eq!(out, "No results found for **\"widgets\"**.");
    }

    #[test]
    fn test_plans_count_block_stays_on_header_line() {
        // The plans section has no bullet lines; the whole line goes bold.
        let out = shortcut_response(
            SEARCH_TOOL,
            &json!({ "query": "q" }),
            "Plans: 3 matching entries found",
        );
        assert_eq!(
            out,
            "Here's what I found for **\"q\"**:\n\n**Plans: 3 matching entries found**\n"
        );
    }

    #[test]
    fn test_list_notes_formatting_counts_bullets() {
        let raw = "Notes:\n- a\n- b — body…\n- c";
        let out = shortcut_response(LIST_NOTES_TOOL, &json!({}), raw);
        assert_eq!(
            out,
            "Here are your **3** note(s):\n\n**Notes**\n- a\n- b — body…\n- c"
        );
    }

    #[test]
    fn test_list_notes_empty() {
        let out = shortcut_response(LIST_NOTES_TOOL, &json!({}), "No notes found.");
        assert_eq!(out, "You have no notes yet.");
    }

    #[test]
    fn test_shortcut_tool_predicate() {
        assert!(is_shortcut_tool("search"));
        assert!(is_shortcut_tool("list_notes"));
        assert!(!is_shortcut_tool("add_note"));
    }
}
