//! Configuration settings for webagent.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Browser-like identification sent with every tool request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub model: ModelSettings,
    pub agent: AgentSettings,
    pub tools: ToolSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error) used when `-v` is not given.
    pub log_level: String,
    /// Dotenv file holding the provider values.
    pub env_file: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            env_file: ".env".to_string(),
        }
    }
}

/// Generation defaults for the completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Sampling temperature used when a call does not override it.
    pub temperature: f32,
    /// Nucleus sampling used when a call does not override it. Unset means 1.0.
    pub top_p: Option<f32>,
    /// Completion length cap used when a call does not override it.
    pub max_tokens: u32,
    /// Timeout for a single completion request, in seconds.
    pub timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            top_p: None,
            max_tokens: 2096,
            timeout_secs: crate::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub name: String,
    pub description: String,
    /// Maximum tool-selection steps per user message.
    pub max_steps: usize,
    /// Number of earlier chat turns replayed to the model.
    pub history_turns: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: "WebAgent".to_string(),
            description: "An AI agent that can search the web, summarize webpages, and get current time information.".to_string(),
            max_steps: 6,
            history_turns: 20,
        }
    }
}

/// Tool behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub user_agent: String,
    /// Webpage fetch timeout in seconds.
    pub fetch_timeout_secs: u64,
    /// DuckDuckGo HTML endpoint.
    pub search_url: String,
    pub search_timeout_secs: u64,
    pub max_search_results: usize,
    /// Number of leading `<p>` elements used for a summary.
    pub max_paragraphs: usize,
    /// Characters of assembled text kept in a summary.
    pub summary_chars: usize,
    /// Characters of page text used when a page has no paragraph text.
    pub fallback_chars: usize,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            fetch_timeout_secs: 10,
            search_url: "https://html.duckduckgo.com/html/".to_string(),
            search_timeout_secs: 20,
            max_search_results: 10,
            max_paragraphs: 30,
            summary_chars: 700,
            fallback_chars: 2000,
        }
    }
}

/// Chat web UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7860,
        }
    }
}

/// Prompt template location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    /// TOML file with prompt templates. Missing or malformed files fall back to defaults.
    pub path: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            path: "prompts.toml".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("webagent")
            .join("config.toml")
    }

    /// The config file in effect: `explicit` (from `--config`) if given, else the default path.
    pub fn config_path(explicit: Option<&str>) -> PathBuf {
        explicit
            .map(Self::expand_path)
            .unwrap_or_else(Self::default_config_path)
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded prompt template path.
    pub fn prompts_path(&self) -> PathBuf {
        Self::expand_path(&self.prompts.path)
    }

    /// Get the expanded dotenv path.
    pub fn env_file(&self) -> PathBuf {
        Self::expand_path(&self.general.env_file)
    }
}
