//! Interactive terminal chat.

use super::build_agent;
use crate::agent::{Agent, AgentResponse};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::model::ChatTurn;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Run the interactive chat command.
pub async fn run_chat(settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Agent, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'webagent doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let agent = build_agent(&settings)?;
    let mut chat = ChatSession::new(agent, settings.agent.history_turns);

    println!("\n{}", style(format!("{} Chat", chat.agent.name())).bold().cyan());
    println!(
        "{}\n",
        style("Type your questions, or 'exit' to quit. Use 'clear' to reset conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            chat.clear_history();
            Output::info("Conversation history cleared.");
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let response = chat.send_message(input).await;
        spinner.finish_and_clear();

        for step in &response.steps {
            Output::step(step);
        }
        println!(
            "\n{} {}\n",
            style(format!("{}:", chat.agent.name())).cyan().bold(),
            response.answer
        );
    }

    Ok(())
}

/// Terminal chat session: the agent plus the turns exchanged so far.
struct ChatSession {
    agent: Agent,
    history: Vec<ChatTurn>,
    max_history: usize,
}

impl ChatSession {
    fn new(agent: Agent, max_history: usize) -> Self {
        Self {
            agent,
            history: Vec::new(),
            max_history,
        }
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Send a message and record the exchange.
    async fn send_message(&mut self, user_input: &str) -> AgentResponse {
        let response = self.agent.run(user_input, &self.history).await;
        debug!(
            "Chat turn used {} iteration(s), {} tool call(s)",
            response.iterations,
            response.steps.len()
        );

        self.history.push(ChatTurn::user(user_input));
        self.history.push(ChatTurn::assistant(response.answer.clone()));
        self.trim_history();

        response
    }

    /// Keep only the most recent turns.
    fn trim_history(&mut self) {
        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(..excess);
        }
    }
}
