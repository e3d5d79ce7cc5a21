//! CLI module for webagent.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{content_preview, Output};

use clap::{Parser, Subcommand};

/// webagent - a web research agent
///
/// Chats with a model that can search the web, read webpages and look up the
/// time in any timezone. Use `chat` in the terminal or `serve` for the web UI.
#[derive(Parser, Debug)]
#[command(name = "webagent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session in the terminal
    Chat,

    /// Run the agent once on a task and print the answer
    Run {
        /// The task for the agent (e.g., "What time is it in Tokyo?")
        task: String,

        /// Maximum tool steps (defaults to agent.max_steps)
        #[arg(short, long)]
        max_steps: Option<usize>,
    },

    /// Start the chat web UI
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Call a single tool directly
    Tool {
        #[command(subcommand)]
        tool: ToolCommand,
    },

    /// Check provider configuration, prompts and settings
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ToolCommand {
    /// Search the web
    Search {
        /// Search query
        query: String,
    },

    /// Summarize a webpage
    Summarize {
        /// Webpage URL
        url: String,
    },

    /// Current time in a timezone
    Time {
        /// IANA timezone name (e.g., "Europe/Oslo")
        timezone: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
