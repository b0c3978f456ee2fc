//! One chat session: the transcript and the latest trip profile.
//!
//! Both live only for the session. A failed turn leaves them untouched.

use voyage::{Message, RunError, TripProfile, TurnOutcome};

use crate::TurnBackend;

#[derive(Debug, Clone, Default)]
pub struct Session {
    transcript: Vec<Message>,
    profile: TripProfile,
    turns: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends `input` as the next user turn. On success the session adopts the turn's
    /// transcript (input plus reply) and profile.
    pub async fn send(
        &mut self,
        backend: &dyn TurnBackend,
        input: &str,
    ) -> Result<TurnOutcome, RunError> {
        let mut transcript = self.transcript.clone();
        transcript.push(Message::user(input));
        let outcome = backend.run_turn(transcript).await?;
        self.transcript = outcome.transcript.clone();
        self.profile = outcome.profile.clone();
        self.turns += 1;
        Ok(outcome)
    }

    /// Drops the transcript and profile.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Profile produced by the most recent successful turn.
    pub fn profile(&self) -> &TripProfile {
        &self.profile
    }

    pub fn turns(&self) -> usize {
        self.turns
    }
}
