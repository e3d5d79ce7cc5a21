use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::message::ChatTurn;
use super::{ChatModel, GenerationParams};
use crate::outcome::TextResult;

/// A mock model that returns pre-configured replies for testing
#[derive(Clone, Default)]
pub struct MockModel {
    replies: Arc<Mutex<Vec<TextResult>>>,
    seen: Arc<Mutex<Vec<Vec<ChatTurn>>>>,
}

impl MockModel {
    /// Create a new mock model with a sequence of successful replies
    pub fn new(replies: Vec<&str>) -> Self {
        Self::with_results(
            replies
                .into_iter()
                .map(|r| TextResult::Success(r.to_string()))
                .collect(),
        )
    }

    /// Create a new mock model with a sequence of replies, failures included
    pub fn with_results(replies: Vec<TextResult>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies)),
            seen: Arc::default(),
        }
    }

    /// Conversations received so far, one per call
    pub fn conversations(&self) -> Vec<Vec<ChatTurn>> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for MockModel {
    async fn complete(&self, turns: &[ChatTurn], _params: &GenerationParams) -> TextResult {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(turns.to_vec());
        }

        match self.replies.lock() {
            Ok(mut replies) if !replies.is_empty() => replies.remove(0),
            // Empty reply if no more pre-configured replies
            _ => TextResult::Success(String::new()),
        }
    }

    fn model_id(&self) -> &str {
        "mock"
    }
}
