//! Agent runner with tool calling loop.

use super::action::parse_action;
use crate::config::{AgentSettings, Prompts};
use crate::model::{ChatModel, ChatTurn, GenerationParams};
use crate::tools::{describe_tools, parse_tool_call, ToolCall, ToolContext};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Agent that answers a task by calling tools step by step.
pub struct Agent {
    model: Arc<dyn ChatModel>,
    tools: ToolContext,
    prompts: Prompts,
    settings: AgentSettings,
    params: GenerationParams,
}

impl Agent {
    /// Create a new agent.
    pub fn new(
        model: Arc<dyn ChatModel>,
        tools: ToolContext,
        prompts: Prompts,
        settings: AgentSettings,
    ) -> Self {
        Self {
            model,
            tools,
            prompts,
            settings,
            params: GenerationParams::default(),
        }
    }

    /// Set generation overrides used for every model call.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Set maximum tool steps for the agent loop.
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.settings.max_steps = max;
        self
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// The rendered system prompt.
    pub fn system_prompt(&self) -> String {
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), self.settings.name.clone());
        vars.insert("description".to_string(), self.settings.description.clone());
        vars.insert("tools".to_string(), describe_tools());
        Prompts::render(&self.prompts.system, &vars)
    }

    /// Run the agent on a task, with earlier chat turns as context.
    ///
    /// Never fails: model and tool failures end up in the answer or in the
    /// step observations.
    #[instrument(skip(self, history), fields(agent = %self.settings.name))]
    pub async fn run(&self, task: &str, history: &[ChatTurn]) -> AgentResponse {
        let skip = history.len().saturating_sub(self.settings.history_turns);

        let mut turns = vec![ChatTurn::system(self.system_prompt())];
        turns.extend(history.iter().skip(skip).cloned());
        turns.push(ChatTurn::user(task));

        let mut steps = Vec::new();

        for iteration in 1..=self.settings.max_steps {
            debug!("Agent step {}, {} turns", iteration, turns.len());

            let reply = self.model.complete(&turns, &self.params).await;
            if reply.is_failure() {
                warn!("Model call failed at step {}", iteration);
                return AgentResponse::new(reply.into_text(), steps, iteration);
            }
            let reply = reply.into_text();

            let Some(action) = parse_action(&reply) else {
                // No action requested: the reply is the answer.
                return AgentResponse::new(reply.trim().to_string(), steps, iteration);
            };
            turns.push(ChatTurn::assistant(reply));

            let record = match parse_tool_call(&action.tool, &action.arguments) {
                Ok(ToolCall::FinalAnswer { answer }) => {
                    info!("Final answer after {} step(s)", iteration);
                    return AgentResponse::new(answer, steps, iteration);
                }
                Ok(call) => {
                    info!("Agent calling tool: {} with args: {}", call.name(), action.arguments);
                    let outcome = self.tools.execute(&call).await;
                    StepRecord {
                        tool: call.name().to_string(),
                        arguments: action.arguments.to_string(),
                        failed: outcome.is_failure(),
                        observation: outcome.into_text(),
                    }
                }
                Err(e) => StepRecord {
                    tool: action.tool,
                    arguments: action.arguments.to_string(),
                    observation: format!("Failed to parse tool call: {}", e),
                    failed: true,
                },
            };

            turns.push(ChatTurn::user(self.render_observation(&record)));
            steps.push(record);
        }

        info!("Step budget of {} exhausted, asking for a final answer", self.settings.max_steps);
        turns.push(ChatTurn::user(self.render_final_answer(task)));
        let reply = self.model.complete(&turns, &self.params).await;

        AgentResponse::new(
            reply.into_text().trim().to_string(),
            steps,
            self.settings.max_steps + 1,
        )
    }

    fn render_observation(&self, record: &StepRecord) -> String {
        let mut vars = HashMap::new();
        vars.insert("tool".to_string(), record.tool.clone());
        vars.insert("observation".to_string(), record.observation.clone());
        Prompts::render(&self.prompts.observation, &vars)
    }

    fn render_final_answer(&self, task: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("task".to_string(), task.to_string());
        Prompts::render(&self.prompts.final_answer, &vars)
    }
}

/// Response from an agent run.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    /// The final answer for the user.
    pub answer: String,
    /// Record of all tool calls made during execution.
    pub steps: Vec<StepRecord>,
    /// Number of model calls used.
    pub iterations: usize,
}

impl AgentResponse {
    fn new(answer: String, steps: Vec<StepRecord>, iterations: usize) -> Self {
        Self {
            answer,
            steps,
            iterations,
        }
    }
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    /// Name of the tool called.
    pub tool: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub observation: String,
    /// Whether the tool reported a failure.
    pub failed: bool,
}

impl std::fmt::Display for StepRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.tool, self.arguments)
    }
}
