//! Agent system for multi-step task execution with tool calling.
//!
//! The model is asked for one action per step; the chosen tool runs and its
//! observation is fed back until the model calls `final_answer`, answers in
//! plain text, or the step budget runs out.

mod action;
mod runner;

pub use action::{parse_action, Action};
pub use runner::{Agent, AgentResponse, StepRecord};
