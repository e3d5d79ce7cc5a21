//! Tool definitions and implementations for the agent.
//!
//! Every tool returns a [`TextResult`]: failures are described in text and
//! handed back to the model like any other observation.

mod search;
mod time;
mod webpage;

pub use search::{parse_results, search_web, SearchResult};
pub use time::{get_current_time_in_timezone, time_in_timezone};
pub use webpage::{summarize_html, summarize_webpage};

use crate::config::ToolSettings;
use crate::error::{Result, WebAgentError};
use crate::outcome::TextResult;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// A parsed tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Search the web.
    SearchWeb { query: String },

    /// Fetch a webpage and return the start of its text.
    SummarizeWebpage { url: String },

    /// Current wall-clock time in an IANA timezone.
    GetCurrentTimeInTimezone { timezone: String },

    /// Stop and answer the user.
    FinalAnswer { answer: String },
}

impl ToolCall {
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::SearchWeb { .. } => "search_web",
            ToolCall::SummarizeWebpage { .. } => "summarize_webpage",
            ToolCall::GetCurrentTimeInTimezone { .. } => "get_current_time_in_timezone",
            ToolCall::FinalAnswer { .. } => "final_answer",
        }
    }
}

/// Description of a tool, rendered into the system prompt.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub argument: &'static str,
    pub argument_description: &'static str,
}

pub const TOOL_SPECS: [ToolSpec; 4] = [
    ToolSpec {
        name: "search_web",
        description: "Searches the web using DuckDuckGo and returns the top results with titles, links and snippets.",
        argument: "query",
        argument_description: "The search query string.",
    },
    ToolSpec {
        name: "summarize_webpage",
        description: "Fetches a webpage and returns the beginning of its text content.",
        argument: "url",
        argument_description: "A valid URL to a webpage.",
    },
    ToolSpec {
        name: "get_current_time_in_timezone",
        description: "Returns the current local time in a timezone.",
        argument: "timezone",
        argument_description: "A valid IANA timezone name (e.g., 'America/New_York').",
    },
    ToolSpec {
        name: "final_answer",
        description: "Provides the final answer to the user and ends the task.",
        argument: "answer",
        argument_description: "The complete answer for the user.",
    },
];

/// Render the tool list for the system prompt, one tool per line.
pub fn describe_tools() -> String {
    TOOL_SPECS
        .iter()
        .map(|spec| {
            format!(
                "- {}: {} Arguments: {{\"{}\": string}} ({})",
                spec.name, spec.description, spec.argument, spec.argument_description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a tool call from a tool name and its JSON arguments.
///
/// A bare string is accepted as the tool's single argument.
pub fn parse_tool_call(name: &str, arguments: &Value) -> Result<ToolCall> {
    let spec = TOOL_SPECS
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| WebAgentError::Tool(format!("Unknown tool: {}", name)))?;

    let value = string_argument(arguments, spec.argument)
        .ok_or_else(|| WebAgentError::Tool(format!("Missing '{}' argument", spec.argument)))?;

    let call = match spec.name {
        "search_web" => ToolCall::SearchWeb { query: value },
        "summarize_webpage" => ToolCall::SummarizeWebpage { url: value },
        "get_current_time_in_timezone" => ToolCall::GetCurrentTimeInTimezone { timezone: value },
        "final_answer" => ToolCall::FinalAnswer { answer: value },
        other => return Err(WebAgentError::Tool(format!("Unknown tool: {}", other))),
    };
    Ok(call)
}

fn string_argument(arguments: &Value, key: &str) -> Option<String> {
    let value = match arguments {
        Value::Object(map) => map.get(key)?,
        other => other,
    };

    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Tool execution context: one HTTP client and the tool settings.
#[derive(Clone)]
pub struct ToolContext {
    client: reqwest::Client,
    settings: ToolSettings,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(settings: ToolSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| WebAgentError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Execute a tool call and return its result text.
    pub async fn execute(&self, call: &ToolCall) -> TextResult {
        info!("Calling tool: {}", call.name());

        match call {
            ToolCall::SearchWeb { query } => search_web(self, query).await,
            ToolCall::SummarizeWebpage { url } => summarize_webpage(self, url).await,
            ToolCall::GetCurrentTimeInTimezone { timezone } => {
                get_current_time_in_timezone(timezone)
            }
            ToolCall::FinalAnswer { answer } => TextResult::Success(answer.clone()),
        }
    }
}

/// Parse a CSS selector, reporting failures as parse errors.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| WebAgentError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}
