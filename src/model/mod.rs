//! Chat model adapter.
//!
//! Turns a generic conversation (role-tagged turns with string, multi-part
//! or missing content) into the two-role message list a chat completions
//! endpoint accepts, and unwraps the endpoint's reply into plain text.

mod completion;
mod message;
mod mock;

pub use completion::{CompletionModel, GenerationParams, ProviderRequest, FALLBACK_TOP_P};
pub use message::{
    flatten_content, translate_messages, ChatTurn, ProviderMessage, ProviderRole, RoleLabel,
    PLACEHOLDER_TEXT,
};
pub use mock::MockModel;

use crate::outcome::TextResult;
use async_trait::async_trait;

/// Trait for anything that can complete a conversation.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Produce the next reply for a conversation. Never fails; problems are
    /// reported as [`TextResult::Failure`] text.
    async fn complete(&self, turns: &[ChatTurn], params: &GenerationParams) -> TextResult;

    /// Identifier of the model behind this implementation.
    fn model_id(&self) -> &str;
}
