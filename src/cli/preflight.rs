//! Pre-flight checks before starting an agent.
//!
//! Validates that the completion endpoint is configured before a chat or
//! server starts, so a missing value is reported up front with a hint.

use crate::config::{ProviderConfig, Settings};
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Chat, run and serve need the completion endpoint.
    Agent,
    /// Direct tool calls have no requirements.
    Tool,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Agent => {
            ProviderConfig::from_env(&settings.env_file())?;
        }
        Operation::Tool => {
            // No external requirements for tools
        }
    }
    Ok(())
}
