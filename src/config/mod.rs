//! Configuration module for webagent.
//!
//! Handles application settings, prompt templates and the completion
//! endpoint identity. Everything here is built once at startup and passed
//! by reference into the model and agent constructors.

mod prompts;
mod provider;
mod settings;

pub use prompts::Prompts;
pub use provider::{ProviderConfig, ENDPOINT_VAR, MODEL_VAR, TOKEN_VAR};
pub use settings::{
    AgentSettings, GeneralSettings, ModelSettings, PromptSettings, ServerSettings, Settings,
    ToolSettings, BROWSER_USER_AGENT,
};
