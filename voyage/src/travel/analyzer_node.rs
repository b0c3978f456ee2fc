//! Analyzer node: extracts the trip profile from the transcript and decides the route.
//!
//! One model call per turn. The reply is parsed as a JSON object (code fences and surrounding
//! prose are tolerated); anything else fails the turn with
//! [`AgentError::MalformedResponse`]. Readiness comes from the parsed profile, never from the
//! wording of the reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::profile::TripProfile;

use super::prompt::{clarifying_question, ANALYZER_SYSTEM_PROMPT};
use super::state::{Route, Stage, TravelState};

pub const ANALYZER_NODE_ID: &str = "analyzer";

/// Parsed analyzer answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub profile: TripProfile,
    /// Free-text message for the user; may be empty.
    pub reply: String,
}

pub struct AnalyzerNode {
    llm: Arc<dyn LlmClient>,
}

impl AnalyzerNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Runs the extraction call alone, without touching any state.
    pub async fn extract(&self, transcript: &[Message]) -> Result<Extraction, AgentError> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);
        messages.push(Message::system(ANALYZER_SYSTEM_PROMPT));
        messages.extend(transcript.iter().cloned());
        let response = self.llm.invoke(&messages).await?;
        parse_extraction(&response.content)
    }
}

#[async_trait]
impl Node<TravelState> for AnalyzerNode {
    fn id(&self) -> &str {
        ANALYZER_NODE_ID
    }

    async fn run(&self, state: TravelState) -> Result<(TravelState, Next), AgentError> {
        let mut state = state;
        state.stages.push(Stage::Analyzing);

        let Extraction { profile, reply } = self.extract(&state.transcript).await?;
        let route = Route::for_profile(&profile);
        debug!(
            route = %route,
            missing = ?profile.missing_fields(),
            "analyzer extracted profile"
        );

        if route == Route::Ask {
            let reply = if reply.trim().is_empty() {
                clarifying_question(&profile.missing_fields())
            } else {
                reply
            };
            state.transcript.push(Message::assistant(reply));
        }
        state.profile = profile;
        state.route = Some(route);
        state.research = None;
        Ok((state, Next::Continue))
    }
}

/// Parses the analyzer's JSON answer.
pub fn parse_extraction(raw: &str) -> Result<Extraction, AgentError> {
    if !raw.contains('{') {
        return Err(AgentError::MalformedResponse(format!(
            "no JSON object in analyzer reply: {}",
            preview(raw)
        )));
    }
    let value = first_object(raw).map_err(|e| {
        AgentError::MalformedResponse(format!("analyzer reply is not valid JSON: {e}"))
    })?;
    let reply = value
        .get("reply")
        .and_then(|r| r.as_str())
        .unwrap_or("")
        .trim()
        .to_string();
    let profile: TripProfile = serde_json::from_value(value)
        .map_err(|e| AgentError::MalformedResponse(format!("bad profile fields: {e}")))?;
    Ok(Extraction { profile, reply })
}

/// Reads exactly one JSON object starting at a `{`; text before and after it is ignored.
///
/// Braces in leading prose are skipped by trying each `{` in turn. On failure the error of the
/// first candidate is returned.
fn first_object(raw: &str) -> Result<serde_json::Value, serde_json::Error> {
    let mut first_err = None;
    for (start, _) in raw.match_indices('{') {
        let mut values =
            serde_json::Deserializer::from_str(&raw[start..]).into_iter::<serde_json::Value>();
        match values.next() {
            Some(Ok(value)) if value.is_object() => return Ok(value),
            Some(Err(e)) if first_err.is_none() => first_err = Some(e),
            _ => {}
        }
    }
    Err(first_err.unwrap_or_else(|| {
        serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "no JSON object",
        ))
    }))
}

fn preview(raw: &str) -> String {
    const MAX: usize = 120;
    match raw.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &raw[..idx]),
        None => raw.to_string(),
    }
}
