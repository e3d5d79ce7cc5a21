//! CLI command implementations.

mod chat;
mod config;
mod doctor;
mod run;
mod serve;
mod tool;

pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use run::run_task;
pub use serve::{router, run_serve, AppState};
pub use tool::run_tool;

use crate::agent::Agent;
use crate::config::{Prompts, ProviderConfig, Settings};
use crate::model::CompletionModel;
use crate::tools::ToolContext;
use std::sync::Arc;

/// Wire up an agent from settings, the provider environment and the prompt file.
pub fn build_agent(settings: &Settings) -> crate::Result<Agent> {
    let provider = ProviderConfig::from_env(&settings.env_file())?;
    let model = CompletionModel::new(&provider, &settings.model)?;
    let tools = ToolContext::new(settings.tools.clone())?;
    let prompts = Prompts::load_or_default(&settings.prompts_path());

    Ok(Agent::new(
        Arc::new(model),
        tools,
        prompts,
        settings.agent.clone(),
    ))
}
