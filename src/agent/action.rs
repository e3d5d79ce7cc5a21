//! Extraction of tool actions from model replies.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced action pattern is valid")
});

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Action {
    #[serde(alias = "name")]
    pub tool: String,
    #[serde(default, alias = "args", alias = "parameters")]
    pub arguments: Value,
}

/// Find the action in a model reply.
///
/// Fenced JSON blocks are tried first, in order; otherwise the span from the
/// first `{` to the last `}` is tried. Replies with no action return `None`.
pub fn parse_action(reply: &str) -> Option<Action> {
    let fenced = FENCED_JSON
        .captures_iter(reply)
        .filter_map(|captures| captures.get(1))
        .find_map(|block| serde_json::from_str::<Action>(block.as_str()).ok());

    fenced.or_else(|| {
        let start = reply.find('{')?;
        let end = reply.rfind('}')?;
        if end <= start {
            return None;
        }
        serde_json::from_str::<Action>(&reply[start..=end]).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_action() {
        let reply = "Thought: I should search.\n```json\n{\"tool\": \"search_web\", \"arguments\": {\"query\": \"tokio\"}}\n```";
        let action = parse_action(reply).unwrap();
        assert_eq!(action.tool, "search_web");
        assert_eq!(action.arguments, json!({"query": "tokio"}));
    }

    #[test]
    fn test_first_valid_fenced_block_wins() {
        let reply = "```\nnot json\n```\n```json\n{\"name\": \"final_answer\", \"args\": {\"answer\": \"42\"}}\n```";
        let action = parse_action(reply).unwrap();
        assert_eq!(action.tool, "final_answer");
        assert_eq!(action.arguments, json!({"answer": "42"}));
    }

    #[test]
    fn test_bare_action() {
        let reply = r#"Calling: {"tool": "get_current_time_in_timezone", "arguments": "Asia/Tokyo"} now"#;
        let action = parse_action(reply).unwrap();
        assert_eq!(action.tool, "get_current_time_in_timezone");
        assert_eq!(action.arguments, json!("Asia/Tokyo"));
    }

    #[test]
    fn test_plain_reply_has_no_action() {
        assert_eq!(parse_action("The capital of Norway is Oslo."), None);
        assert_eq!(parse_action("Sets look like {1, 2} in maths."), None);
        assert_eq!(parse_action("} backwards {"), None);
    }
}
