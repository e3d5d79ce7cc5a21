//! Completion model backed by an OpenAI-compatible chat completions endpoint.

use super::message::{translate_messages, ChatTurn, ProviderMessage};
use super::ChatModel;
use crate::config::{ModelSettings, ProviderConfig};
use crate::error::{Result, WebAgentError};
use crate::openai::create_client_with_timeout;
use crate::outcome::TextResult;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// `top_p` used when neither the call nor the settings give one.
pub const FALLBACK_TOP_P: f32 = 1.0;

/// Per-call overrides for the generation parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// A fully resolved request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub model: String,
    pub messages: Vec<ProviderMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

/// Adapter between generic chat turns and the completion endpoint.
///
/// Holds nothing but the values fixed at construction time, so one instance
/// can serve every request for the life of the process.
pub struct CompletionModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    top_p: Option<f32>,
    max_tokens: u32,
}

impl CompletionModel {
    /// Create a model for the configured endpoint.
    pub fn new(provider: &ProviderConfig, settings: &ModelSettings) -> Result<Self> {
        let client =
            create_client_with_timeout(provider, Duration::from_secs(settings.timeout_secs))?;

        Ok(Self {
            client,
            model: provider.model.clone(),
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_tokens: settings.max_tokens,
        })
    }

    /// Translate a conversation into a request for the endpoint.
    ///
    /// Call overrides win over the stored defaults, which win over the
    /// fallbacks. Never fails, whatever shape the turns have.
    pub fn translate_request(&self, turns: &[ChatTurn], params: &GenerationParams) -> ProviderRequest {
        ProviderRequest {
            model: self.model.clone(),
            messages: translate_messages(turns),
            temperature: params.temperature.unwrap_or(self.temperature),
            top_p: params.top_p.or(self.top_p).unwrap_or(FALLBACK_TOP_P),
            max_tokens: params.max_tokens.unwrap_or(self.max_tokens),
        }
    }

    /// Send a request and return the first choice's text.
    ///
    /// Failures of any kind come back as a [`TextResult::Failure`] describing
    /// the cause; nothing is raised to the caller.
    #[instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    pub async fn invoke(&self, request: ProviderRequest) -> TextResult {
        match self.send(request).await {
            Ok(text) => TextResult::Success(text),
            Err(e) => {
                let cause = match e {
                    WebAgentError::Model(cause) => cause,
                    other => other.to_string(),
                };
                error!("Model API error: {}", cause);
                TextResult::Failure(format!("Error calling model API: {}", cause))
            }
        }
    }

    #[allow(deprecated)]
    async fn send(&self, request: ProviderRequest) -> Result<String> {
        let messages = request
            .messages
            .into_iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Requesting completion: temperature={}, top_p={}, max_tokens={}",
            request.temperature, request.top_p, request.max_tokens
        );

        let body = CreateChatCompletionRequestArgs::default()
            .model(request.model)
            .messages(messages)
            .temperature(request.temperature)
            .top_p(request.top_p)
            .max_tokens(request.max_tokens)
            .build()
            .map_err(|e| WebAgentError::Model(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(body)
            .await
            .map_err(|e| WebAgentError::Model(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| WebAgentError::Model("response contained no choices".to_string()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

fn to_request_message(message: ProviderMessage) -> Result<ChatCompletionRequestMessage> {
    let message = match message {
        ProviderMessage::System(text) => ChatCompletionRequestSystemMessageArgs::default()
            .content(text)
            .build()
            .map_err(|e| WebAgentError::Model(e.to_string()))?
            .into(),
        ProviderMessage::User(text) => ChatCompletionRequestUserMessageArgs::default()
            .content(text)
            .build()
            .map_err(|e| WebAgentError::Model(e.to_string()))?
            .into(),
    };
    Ok(message)
}

#[async_trait]
impl ChatModel for CompletionModel {
    async fn complete(&self, turns: &[ChatTurn], params: &GenerationParams) -> TextResult {
        let request = self.translate_request(turns, params);
        self.invoke(request).await
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
