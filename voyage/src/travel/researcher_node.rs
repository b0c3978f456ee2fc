//! Researcher node: two web searches (flights, hotels) built from the profile.

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::search::WebSearchAdapter;

use super::prompt::{flights_query, hotels_query};
use super::state::{ResearchPayload, Stage, TravelState};

pub const RESEARCHER_NODE_ID: &str = "researcher";

pub struct ResearcherNode {
    search: WebSearchAdapter,
}

impl ResearcherNode {
    pub fn new(search: WebSearchAdapter) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Node<TravelState> for ResearcherNode {
    fn id(&self) -> &str {
        RESEARCHER_NODE_ID
    }

    /// Never fails: search problems arrive as sentinel text in the payload.
    async fn run(&self, state: TravelState) -> Result<(TravelState, Next), AgentError> {
        let mut state = state;
        state.stages.push(Stage::Researching);

        let flights = self.search.search(&flights_query(&state.profile)).await;
        let hotels = self.search.search(&hotels_query(&state.profile)).await;
        debug!(
            flights_bytes = flights.len(),
            hotels_bytes = hotels.len(),
            "research complete"
        );

        state.research = Some(ResearchPayload { flights, hotels });
        Ok((state, Next::Continue))
    }
}
