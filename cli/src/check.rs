//! `voyage check`: one "Ping" completion to confirm the key and endpoint work.

use voyage::{AgentError, LlmClient, Message};

pub const PING_MESSAGE: &str = "Ping";

#[derive(Debug)]
pub enum CheckOutcome {
    Ok { model: String },
    ApiError(AgentError),
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckOutcome::Ok { model } => write!(f, "connection OK, model: {model}"),
            CheckOutcome::ApiError(e) => write!(f, "API error: {e}"),
        }
    }
}

impl CheckOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckOutcome::Ok { .. })
    }
}

/// Sends [`PING_MESSAGE`] once; no retry.
pub async fn run_check(llm: &dyn LlmClient, model: &str) -> CheckOutcome {
    match llm.invoke(&[Message::user(PING_MESSAGE)]).await {
        Ok(_) => CheckOutcome::Ok {
            model: model.to_string(),
        },
        Err(e) => CheckOutcome::ApiError(e),
    }
}
