//! Chat surface for Voyage: session state, output rendering, and the connectivity check.
//!
//! The binary (`voyage`) wires these to stdin/stdout; everything here is testable without a
//! terminal or a network.

pub mod check;
pub mod output;
pub mod session;

pub use check::{run_check, CheckOutcome, PING_MESSAGE};
pub use output::{profile_view, turn_json};
pub use session::Session;

use async_trait::async_trait;
use voyage::{Message, RunError, TravelAgent, TurnOutcome};

/// Runs one turn over a transcript. Implemented by [`TravelAgent`]; tests use scripted doubles.
#[async_trait]
pub trait TurnBackend: Send + Sync {
    async fn run_turn(&self, transcript: Vec<Message>) -> Result<TurnOutcome, RunError>;
}

#[async_trait]
impl TurnBackend for TravelAgent {
    async fn run_turn(&self, transcript: Vec<Message>) -> Result<TurnOutcome, RunError> {
        TravelAgent::run_turn(self, transcript).await
    }
}
