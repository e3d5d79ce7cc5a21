//! One-shot agent run.

use super::build_agent;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the agent on a single task.
pub async fn run_task(task: &str, max_steps: Option<usize>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Agent, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'webagent doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let mut agent = build_agent(&settings)?;
    if let Some(max) = max_steps {
        agent = agent.with_max_steps(max);
    }

    let spinner = Output::spinner("Agent working...");
    let response = agent.run(task, &[]).await;
    spinner.finish_and_clear();

    println!("\n{}\n", response.answer);

    if !response.steps.is_empty() {
        Output::header(&format!("Tool calls ({})", response.steps.len()));
        for step in &response.steps {
            Output::step(step);
        }
        println!();
    }

    Output::info(&format!("Completed in {} iteration(s)", response.iterations));

    Ok(())
}
