//! LLM client abstraction used by the analyzer and architect nodes.
//!
//! [`ChatOpenAI`] talks to any OpenAI-compatible chat completions endpoint (Groq by default);
//! [`MockLlm`] returns scripted replies for tests.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

/// Token usage for one LLM call.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Assistant text returned by one completion.
#[derive(Clone, Debug)]
pub struct LlmResponse {
    pub content: String,
    /// Token usage, when the endpoint reports it.
    pub usage: Option<LlmUsage>,
}

/// LLM client: given messages, returns the assistant's text.
///
/// Implementations must not retry; a failed call is reported as
/// [`AgentError::ExecutionFailed`] and aborts the turn.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion over the given messages (system, user, assistant history).
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
