//! Prompt templates for the agent.
//!
//! Templates live in a single TOML file. A missing or malformed file is not
//! fatal: the built-in defaults are used and a warning is logged.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is valid"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    /// System prompt. Variables: `{{name}}`, `{{description}}`, `{{tools}}`.
    pub system: String,
    /// Wraps a tool result fed back to the model. Variables: `{{tool}}`, `{{observation}}`.
    pub observation: String,
    /// Sent when the step budget is exhausted. Variables: `{{task}}`.
    pub final_answer: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            system: r#"You are {{name}}. {{description}}

You solve the user's task step by step. At each step you may call exactly one tool.
To call a tool, reply with a single JSON object in a ```json code block:

```json
{"tool": "<tool name>", "arguments": {"<argument>": "<value>"}}
```

Available tools:
{{tools}}

After each tool call you will receive an observation with its result.
When you know the answer, call `final_answer` with the complete answer for the user.
Tool results may be error messages; read them and try another approach instead of repeating the same call.
Never invent tool results."#
                .to_string(),

            observation: "Observation from {{tool}}:\n{{observation}}".to_string(),

            final_answer: r#"You have run out of tool steps. Using only what you have learned above, give your best final answer to the task below. Reply with the answer text only, no JSON.

Task: {{task}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from a TOML file.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load prompts from a TOML file, falling back to the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            warn!("{} not found. Using default prompts.", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(prompts) => {
                debug!("Loaded prompts from {}", path.display());
                prompts
            }
            Err(e) => {
                warn!("Error parsing {}: {}. Using default prompts.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Render a prompt template with the given variables.
    ///
    /// One pass over the template: substituted values are never scanned
    /// again, and unknown placeholders are left as written.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.system.contains("{{tools}}"));
        assert!(prompts.observation.contains("{{observation}}"));
        assert!(prompts.final_answer.contains("{{task}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_does_not_expand_substituted_values() {
        let mut vars = HashMap::new();
        vars.insert("tool".to_string(), "search_web".to_string());
        vars.insert("observation".to_string(), "page says {{tool}} and {{other}}".to_string());

        let result = Prompts::render("Observation from {{tool}}:\n{{observation}}", &vars);
        assert_eq!(result, "Observation from search_web:\npage says {{tool}} and {{other}}");
        assert_eq!(Prompts::render("{{missing}}", &vars), "{{missing}}");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prompts = Prompts::load_or_default(&dir.path().join("prompts.toml"));
        assert_eq!(prompts, Prompts::default());
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "system = \"unterminated").unwrap();
        let prompts = Prompts::load_or_default(file.path());
        assert_eq!(prompts, Prompts::default());
    }

    #[test]
    fn test_partial_file_overrides_only_given_templates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "observation = \"Result: {{{{observation}}}}\"").unwrap();
        let prompts = Prompts::load_or_default(file.path());
        assert_eq!(prompts.observation, "Result: {{observation}}");
        assert_eq!(prompts.system, Prompts::default().system);
    }
}
