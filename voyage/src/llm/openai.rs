//! OpenAI-compatible Chat Completions client implementing `LlmClient`.
//!
//! Groq exposes the OpenAI wire format under `https://api.groq.com/openai/v1`, so the same
//! client serves Groq, OpenAI, or any compatible gateway depending on the configured base URL.
//! Requests are non-streaming and carry no tools.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage};
use crate::message::Message;
use crate::settings::Settings;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

/// Chat completions client (aligns with LangChain's ChatOpenAI / ChatGroq).
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    api_base: String,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Client for `model` at `api_base`, authenticated with `api_key`.
    pub fn new(api_key: &str, api_base: impl Into<String>, model: impl Into<String>) -> Self {
        let api_base = api_base.into();
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base.clone());
        Self {
            client: Client::with_config(config),
            api_base,
            model: model.into(),
            temperature: None,
        }
    }

    /// Client built from validated settings, including the fixed temperature.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.api_key, settings.api_base.clone(), settings.model.clone())
            .with_temperature(settings.temperature)
    }

    /// Set temperature (0–2). 0 keeps extraction and synthesis deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => ChatCompletionRequestMessage::Assistant(s.as_str().into()),
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("chat request build failed: {}", e))
        })?;

        let url = self.chat_completions_url();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            temperature = ?self.temperature,
            "chat completion create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "chat completion request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("chat completion API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "chat completion response body");
        }

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            AgentError::ExecutionFailed("chat completion returned no choices".to_string())
        })?;
        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        if let Some(ref u) = usage {
            debug!(trace_id = %trace_id, total_tokens = u.total_tokens, "chat completion usage");
        }
        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_completions_url_joins_base() {
        let llm = ChatOpenAI::new("k", "https://api.groq.com/openai/v1/", "llama-3.3-70b-versatile");
        assert_eq!(
            llm.chat_completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(llm.model(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn messages_map_one_to_one() {
        let req = ChatOpenAI::messages_to_request(&[
            Message::system("extract"),
            Message::user("Vilnius"),
            Message::assistant("when?"),
        ]);
        assert_eq!(req.len(), 3);
        assert!(matches!(req[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(req[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(req[2], ChatCompletionRequestMessage::Assistant(_)));
    }

    /// Live call against the configured endpoint.
    #[tokio::test]
    #[ignore = "requires GROQ_API_KEY and network; run with: cargo test -p voyage live_ping -- --ignored"]
    async fn live_ping() {
        dotenv::dotenv().ok();
        let settings = Settings::from_env().expect("settings from env");
        let llm = ChatOpenAI::from_settings(&settings);
        let resp = llm.invoke(&[Message::user("Ping")]).await.expect("ping");
        assert!(!resp.content.is_empty());
    }
}
