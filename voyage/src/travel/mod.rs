//! Travel planner graph: analyzer → (ask | researcher → architect).
//!
//! - [`AnalyzerNode`]: extracts the [`TripProfile`](crate::profile::TripProfile) and sets the
//!   [`Route`].
//! - [`ResearcherNode`]: two web searches (flights, hotels).
//! - [`ArchitectNode`]: one synthesis call producing the itinerary.
//! - [`TravelAgent`]: builds the graph and runs one turn per user message.

mod analyzer_node;
mod architect_node;
mod prompt;
mod researcher_node;
mod runner;
mod state;

pub use analyzer_node::{parse_extraction, AnalyzerNode, Extraction, ANALYZER_NODE_ID};
pub use architect_node::{ArchitectNode, ARCHITECT_NODE_ID};
pub use prompt::{
    architect_prompt, clarifying_question, flights_query, hotels_query, ANALYZER_SYSTEM_PROMPT,
};
pub use researcher_node::{ResearcherNode, RESEARCHER_NODE_ID};
pub use runner::{build_travel_graph, RunError, TravelAgent, TurnOutcome};
pub use state::{ResearchPayload, Route, Stage, TravelState};
