//! Mock LLM for tests: scripted replies, in order, with a record of every prompt.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

/// Mock LLM: returns the queued replies one per call.
///
/// When the queue runs dry the last reply is repeated, so a single-reply mock behaves like a
/// fixed-response model. A queued `Err` simulates an endpoint failure. Every call's messages
/// are kept and can be inspected with [`MockLlm::calls`].
pub struct MockLlm {
    script: Mutex<VecDeque<Result<String, String>>>,
    last: Mutex<Option<Result<String, String>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Replies with `content` on every call.
    pub fn with_reply(content: impl Into<String>) -> Self {
        Self::with_replies([content.into()])
    }

    /// Replies with each item in turn, then keeps repeating the last one.
    pub fn with_replies<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            script: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with `ExecutionFailed(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([Err(message.into())])),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Appends a failure after the replies queued so far.
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("mock script lock")
            .push_back(Err(message.into()));
        self
    }

    /// Messages passed to each call, oldest first.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().expect("mock calls lock").clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock calls lock").len()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.calls
            .lock()
            .expect("mock calls lock")
            .push(messages.to_vec());

        let next = self.script.lock().expect("mock script lock").pop_front();
        let mut last = self.last.lock().expect("mock last lock");
        let step = match next {
            Some(step) => {
                *last = Some(step.clone());
                step
            }
            None => last.clone().unwrap_or_else(|| Ok(String::new())),
        };
        step.map(|content| LlmResponse {
            content,
            usage: None,
        })
        .map_err(AgentError::ExecutionFailed)
    }
}
