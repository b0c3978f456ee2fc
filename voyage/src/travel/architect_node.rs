//! Architect node: one synthesis call over the profile and the research payload.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;

use super::prompt::architect_prompt;
use super::state::{Stage, TravelState};

pub const ARCHITECT_NODE_ID: &str = "architect";

pub struct ArchitectNode {
    llm: Arc<dyn LlmClient>,
}

impl ArchitectNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<TravelState> for ArchitectNode {
    fn id(&self) -> &str {
        ARCHITECT_NODE_ID
    }

    async fn run(&self, state: TravelState) -> Result<(TravelState, Next), AgentError> {
        let mut state = state;
        state.stages.push(Stage::Synthesizing);

        let research = state.research.clone().unwrap_or_default();
        let prompt = architect_prompt(&state.profile, &research);
        let response = self.llm.invoke(&[Message::user(prompt)]).await?;
        if let Some(usage) = &response.usage {
            debug!(total_tokens = usage.total_tokens, "architect usage");
        }

        state.transcript.push(Message::assistant(response.content));
        Ok((state, Next::Continue))
    }
}
