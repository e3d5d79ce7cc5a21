//! Direct tool invocation, without the model.

use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, ToolCommand};
use crate::config::Settings;
use crate::tools::{ToolCall, ToolContext};
use anyhow::Result;

/// Run one tool and print its result.
pub async fn run_tool(command: &ToolCommand, settings: Settings) -> Result<()> {
    preflight::check(Operation::Tool, &settings)?;
    let context = ToolContext::new(settings.tools)?;

    let call = match command {
        ToolCommand::Search { query } => ToolCall::SearchWeb {
            query: query.clone(),
        },
        ToolCommand::Summarize { url } => ToolCall::SummarizeWebpage { url: url.clone() },
        ToolCommand::Time { timezone } => ToolCall::GetCurrentTimeInTimezone {
            timezone: timezone.clone(),
        },
    };

    let spinner = Output::spinner(&format!("Running {}...", call.name()));
    let result = context.execute(&call).await;
    spinner.finish_and_clear();

    if result.is_failure() {
        Output::warning(result.text());
    } else {
        println!("{}", result);
    }

    Ok(())
}
