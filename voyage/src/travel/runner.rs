//! Travel graph runner: build, invoke, and summarize one turn.
//!
//! Graph: START → analyzer → [route] → researcher → architect → END, or analyzer → END when
//! the profile is incomplete.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::{ChatOpenAI, LlmClient};
use crate::message::Message;
use crate::profile::TripProfile;
use crate::search::WebSearchAdapter;
use crate::settings::Settings;

use super::analyzer_node::{AnalyzerNode, ANALYZER_NODE_ID};
use super::architect_node::{ArchitectNode, ARCHITECT_NODE_ID};
use super::researcher_node::{ResearcherNode, RESEARCHER_NODE_ID};
use super::state::{Route, Stage, TravelState};

/// Error type for [`TravelAgent`] operations.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
    #[error("execution failed: {0}")]
    Execution(#[from] AgentError),
}

/// Result of one turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The assistant turn appended by this run.
    pub reply: String,
    /// Profile extracted during this turn.
    pub profile: TripProfile,
    pub route: Route,
    /// Stages visited, ending with [`Stage::Done`].
    pub stages: Vec<Stage>,
    /// Input transcript plus the reply.
    pub transcript: Vec<Message>,
}

/// Wires the three nodes into the travel graph.
pub fn build_travel_graph(
    llm: Arc<dyn LlmClient>,
    search: WebSearchAdapter,
) -> Result<CompiledStateGraph<TravelState>, CompilationError> {
    let path_map: HashMap<String, String> = [
        (Route::Research.as_str().to_string(), RESEARCHER_NODE_ID.to_string()),
        (Route::Ask.as_str().to_string(), END.to_string()),
    ]
    .into_iter()
    .collect();

    let mut graph = StateGraph::<TravelState>::new();
    graph
        .add_node(ANALYZER_NODE_ID, Arc::new(AnalyzerNode::new(Arc::clone(&llm))))
        .add_node(RESEARCHER_NODE_ID, Arc::new(ResearcherNode::new(search)))
        .add_node(ARCHITECT_NODE_ID, Arc::new(ArchitectNode::new(llm)))
        .add_edge(START, ANALYZER_NODE_ID)
        .add_conditional_edges(
            ANALYZER_NODE_ID,
            Arc::new(|s: &TravelState| s.route_key()),
            Some(path_map),
        )
        .add_edge(RESEARCHER_NODE_ID, ARCHITECT_NODE_ID)
        .add_edge(ARCHITECT_NODE_ID, END);
    graph.compile()
}

/// Conversational travel planner: one graph invocation per user turn.
pub struct TravelAgent {
    compiled: CompiledStateGraph<TravelState>,
}

impl TravelAgent {
    pub fn new(llm: Arc<dyn LlmClient>, search: WebSearchAdapter) -> Result<Self, CompilationError> {
        Ok(Self {
            compiled: build_travel_graph(llm, search)?,
        })
    }

    /// Agent backed by the configured chat endpoint and search provider.
    pub fn from_settings(settings: &Settings) -> Result<Self, CompilationError> {
        Self::new(
            Arc::new(ChatOpenAI::from_settings(settings)),
            WebSearchAdapter::from_settings(settings),
        )
    }

    /// Runs one turn over `transcript`, whose last message is the new user input.
    pub async fn run_turn(&self, transcript: Vec<Message>) -> Result<TurnOutcome, RunError> {
        let input_len = transcript.len();
        let mut state = self.compiled.invoke(TravelState::new(transcript)).await?;
        state.stages.push(Stage::Done);

        let route = state.route.unwrap_or(Route::Ask);
        let reply = match (state.transcript.len() > input_len, state.last_reply()) {
            (true, Some(reply)) => reply.to_string(),
            _ => {
                return Err(AgentError::ExecutionFailed(
                    "turn ended without an assistant reply".to_string(),
                )
                .into())
            }
        };
        info!(
            route = %route,
            stages = ?state.stages,
            missing = state.profile.missing_fields().len(),
            "turn complete"
        );

        Ok(TurnOutcome {
            reply,
            profile: state.profile,
            route,
            stages: state.stages,
            transcript: state.transcript,
        })
    }

    /// Appends `user_input` to `history` and runs a turn.
    pub async fn respond(&self, history: &[Message], user_input: &str) -> Result<TurnOutcome, RunError> {
        let mut transcript = history.to_vec();
        transcript.push(Message::user(user_input));
        self.run_turn(transcript).await
    }
}
