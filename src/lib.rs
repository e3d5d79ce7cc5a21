//! webagent - a tool-using web research agent
//!
//! A chat agent backed by an OpenAI-compatible completions endpoint that can
//! search the web, summarize webpages and tell the time in any timezone.
//!
//! # Overview
//!
//! - Chat in the terminal or through a small web UI
//! - Run the agent once on a task from the command line
//! - Call each tool directly, without the model
//!
//! # Architecture
//!
//! - `config` - Settings, prompt templates and provider identity
//! - `model` - Conversation adapter for the completions endpoint
//! - `tools` - Web search, webpage summary and timezone clock
//! - `agent` - Step loop that lets the model call tools
//! - `outcome` - Success/failure text result shared by model and tools
//! - `cli` - Commands and terminal output
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use webagent::agent::Agent;
//! use webagent::config::{Prompts, ProviderConfig, Settings};
//! use webagent::model::CompletionModel;
//! use webagent::tools::ToolContext;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let provider = ProviderConfig::from_env(&settings.env_file())?;
//!     let model = CompletionModel::new(&provider, &settings.model)?;
//!     let agent = Agent::new(
//!         Arc::new(model),
//!         ToolContext::new(settings.tools.clone())?,
//!         Prompts::default(),
//!         settings.agent.clone(),
//!     );
//!
//!     let response = agent.run("What time is it in Tokyo?", &[]).await;
//!     println!("{}", response.answer);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod openai;
pub mod outcome;
pub mod tools;

pub use error::{Result, WebAgentError};
