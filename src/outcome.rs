//! Result-or-error-text values returned across the model and tool boundaries.

use serde::Serialize;
use std::fmt;

/// Text produced by a collaborator call, successful or not.
///
/// Both variants carry text that is safe to hand straight back to the
/// conversation. A failing search or model call shows up here as data
/// instead of interrupting the agent loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum TextResult {
    Success(String),
    Failure(String),
}

impl TextResult {
    pub fn text(&self) -> &str {
        match self {
            TextResult::Success(text) | TextResult::Failure(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            TextResult::Success(text) | TextResult::Failure(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TextResult::Failure(_))
    }
}

impl fmt::Display for TextResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
