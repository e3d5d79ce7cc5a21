//! Chat turns and their translation into provider messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text substituted when a conversation translates to no messages at all.
pub const PLACEHOLDER_TEXT: &str = "Hello";

/// One role-tagged message in a conversation.
///
/// `content` is kept as raw JSON: a string, a list of typed parts, null, or
/// anything else a caller happened to send. Deserialization accepts any
/// JSON value, so a conversation received over the wire never fails to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ChatTurn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub content: Value,
}

impl ChatTurn {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            content: Value::String(content.into()),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// The resolved role of this turn.
    pub fn role_label(&self) -> RoleLabel {
        RoleLabel::resolve(self.role.as_deref())
    }

    /// The flattened text of this turn.
    pub fn text(&self) -> String {
        flatten_content(&self.content)
    }
}

impl From<Value> for ChatTurn {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let role = match map.remove("role") {
                    Some(Value::String(role)) => Some(role),
                    Some(Value::Null) | None => None,
                    Some(other) => Some(other.to_string()),
                };
                let content = map.remove("content").unwrap_or(Value::Null);
                Self { role, content }
            }
            Value::String(text) => Self::user(text),
            other => Self::user(other.to_string()),
        }
    }
}

/// Role of a chat turn as understood by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleLabel {
    System,
    User,
    Assistant,
    Other,
}

impl RoleLabel {
    /// Case-insensitive containment check; `system` wins over `user`, which wins over `assistant`.
    ///
    /// Labels such as `MessageRole.SYSTEM` or `tool-response` resolve too;
    /// anything unrecognized, including a missing label, is `Other`.
    pub fn resolve(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return RoleLabel::Other;
        };
        let label = label.to_lowercase();

        if label.contains("system") {
            RoleLabel::System
        } else if label.contains("user") {
            RoleLabel::User
        } else if label.contains("assistant") {
            RoleLabel::Assistant
        } else {
            RoleLabel::Other
        }
    }
}

/// The two roles the completion endpoint is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderRole {
    System,
    User,
}

impl From<RoleLabel> for ProviderRole {
    /// Only system turns stay system. Assistant turns are re-sent as user
    /// turns; this collapsing is observed behaviour of the adapter and is
    /// kept as-is (see DESIGN.md).
    fn from(label: RoleLabel) -> Self {
        match label {
            RoleLabel::System => ProviderRole::System,
            RoleLabel::User | RoleLabel::Assistant | RoleLabel::Other => ProviderRole::User,
        }
    }
}

/// A message in the completion endpoint's own two-role scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderMessage {
    System(String),
    User(String),
}

impl ProviderMessage {
    pub fn new(role: ProviderRole, text: String) -> Self {
        match role {
            ProviderRole::System => ProviderMessage::System(text),
            ProviderRole::User => ProviderMessage::User(text),
        }
    }

    pub fn role(&self) -> ProviderRole {
        match self {
            ProviderMessage::System(_) => ProviderRole::System,
            ProviderMessage::User(_) => ProviderRole::User,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ProviderMessage::System(text) | ProviderMessage::User(text) => text,
        }
    }
}

/// Reduce turn content to plain text.
///
/// Lists contribute the `text` of every `{"type": "text"}` part in order and
/// drop everything else; null becomes the empty string; any other value is
/// rendered as its string form.
pub fn flatten_content(content: &Value) -> String {
    match content {
        Value::Array(parts) => parts
            .iter()
            .filter(|part| part.get("type").and_then(Value::as_str) == Some("text"))
            .map(|part| part.get("text").map(coerce_text).unwrap_or_default())
            .collect(),
        other => coerce_text(other),
    }
}

/// Only null is empty. `0`, `false` and `{}` keep their JSON text so a
/// turn never loses a value the caller actually sent.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Translate a conversation into provider messages, in order.
///
/// Never fails and never returns an empty list.
pub fn translate_messages(turns: &[ChatTurn]) -> Vec<ProviderMessage> {
    let mut messages: Vec<ProviderMessage> = turns
        .iter()
        .map(|turn| ProviderMessage::new(turn.role_label().into(), turn.text()))
        .collect();

    if messages.is_empty() {
        messages.push(ProviderMessage::User(PLACEHOLDER_TEXT.to_string()));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn turns(value: Value) -> Vec<ChatTurn> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_conversation_gets_placeholder() {
        let messages = translate_messages(&[]);
        assert_eq!(messages, vec![ProviderMessage::User("Hello".to_string())]);
    }

    #[test]
    fn test_role_resolution() {
        assert_eq!(RoleLabel::resolve(Some("system")), RoleLabel::System);
        assert_eq!(RoleLabel::resolve(Some("MessageRole.SYSTEM")), RoleLabel::System);
        assert_eq!(RoleLabel::resolve(Some("User")), RoleLabel::User);
        assert_eq!(RoleLabel::resolve(Some("ASSISTANT")), RoleLabel::Assistant);
        assert_eq!(RoleLabel::resolve(Some("tool-call")), RoleLabel::Other);
        assert_eq!(RoleLabel::resolve(Some("")), RoleLabel::Other);
        assert_eq!(RoleLabel::resolve(None), RoleLabel::Other);
    }

    #[test]
    fn test_system_is_checked_before_user() {
        assert_eq!(RoleLabel::resolve(Some("system_user")), RoleLabel::System);
        assert_eq!(RoleLabel::resolve(Some("user_assistant")), RoleLabel::User);
    }

    #[test]
    fn test_assistant_turns_are_sent_as_user() {
        let messages = translate_messages(&turns(json!([
            {"role": "system", "content": "be brief"},
            {"role": "Assistant", "content": "earlier reply"},
            {"role": "MessageRole.ASSISTANT", "content": "another"},
            {"role": "tool-response", "content": "observation"}
        ])));

        assert_eq!(
            messages,
            vec![
                ProviderMessage::System("be brief".to_string()),
                ProviderMessage::User("earlier reply".to_string()),
                ProviderMessage::User("another".to_string()),
                ProviderMessage::User("observation".to_string()),
            ]
        );
        assert!(messages[1..].iter().all(|m| m.role() == ProviderRole::User));
    }

    #[test]
    fn test_list_content_keeps_only_text_parts_in_order() {
        let content = json!([
            {"type": "text", "text": "first "},
            {"type": "image", "image": "data:image/png;base64,AAAA"},
            {"type": "text", "text": "second"},
            {"text": "untyped part"},
            "bare string part",
            {"type": "text"}
        ]);
        assert_eq!(flatten_content(&content), "first second");
    }

    #[test]
    fn test_only_null_content_is_empty() {
        assert_eq!(flatten_content(&Value::Null), "");
        assert_eq!(flatten_content(&json!("")), "");
        assert_eq!(flatten_content(&json!(0)), "0");
        assert_eq!(flatten_content(&json!(false)), "false");
        assert_eq!(flatten_content(&json!({})), "{}");
        assert_eq!(flatten_content(&json!([])), "");
    }

    #[test]
    fn test_malformed_turns_never_fail() {
        let messages = translate_messages(&turns(json!([
            {"role": null, "content": null},
            {"role": "user", "content": []},
            {"role": "user", "content": [{"type": "image"}, {"type": "audio"}]},
            {"content": 42},
            {"role": 7, "content": {"nested": true}},
            "plain string turn",
            null
        ])));

        assert_eq!(
            messages,
            vec![
                ProviderMessage::User(String::new()),
                ProviderMessage::User(String::new()),
                ProviderMessage::User(String::new()),
                ProviderMessage::User("42".to_string()),
                ProviderMessage::User(r#"{"nested":true}"#.to_string()),
                ProviderMessage::User("plain string turn".to_string()),
                ProviderMessage::User("null".to_string()),
            ]
        );
    }

    #[test]
    fn test_turn_serializes_back_to_role_and_content() {
        let turn = ChatTurn::assistant("hi");
        assert_eq!(
            serde_json::to_value(&turn).unwrap(),
            json!({"role": "assistant", "content": "hi"})
        );
    }
}
