//! # Voyage
//!
//! A conversational travel planner built on a small state graph. Each user turn runs the
//! graph once:
//!
//! 1. **analyzer** extracts a [`TripProfile`] (origin, destination, dates, budget, interests,
//!    group) from the transcript and picks a [`Route`].
//! 2. If a field is still missing the turn ends with a clarifying question.
//! 3. Otherwise **researcher** runs two web searches (flights, hotels) and **architect** asks
//!    the model for an itinerary grounded in the results.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`].
//! - [`travel`]: the three nodes, [`TravelAgent`], [`TurnOutcome`].
//! - [`search`]: [`WebSearchAdapter`] over DuckDuckGo or Exa; failures become sentinel text.
//! - [`llm`]: [`LlmClient`], [`ChatOpenAI`] (Groq by default), [`MockLlm`].
//! - [`settings`]: [`Settings`] read from the environment.
//!
//! ```rust,no_run
//! use voyage::{Message, Settings, TravelAgent};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let agent = TravelAgent::from_settings(&settings)?;
//! let outcome = agent
//!     .run_turn(vec![Message::user("Vilnius from Rome, next month, 2 people, 400 euros, sightseeing")])
//!     .await?;
//! println!("{}", outcome.reply);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod profile;
pub mod search;
pub mod settings;
pub mod travel;

pub use error::AgentError;
pub use graph::{CompilationError, CompiledStateGraph, Next, Node, StateGraph, END, START};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm};
pub use message::Message;
pub use profile::{ProfileField, TripProfile, MISSING};
pub use search::{
    SearchError, SearchProvider, SearchRecord, WebSearchAdapter, CONNECTION_ERROR_SENTINEL,
    NO_DATA_SENTINEL,
};
pub use settings::{ConfigError, Settings};
pub use travel::{RunError, Route, Stage, TravelAgent, TravelState, TurnOutcome};
