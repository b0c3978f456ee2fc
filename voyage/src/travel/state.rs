//! State carried through the travel graph for one turn.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::profile::TripProfile;

/// Routing decision made after extraction. Never persisted between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Profile incomplete: end the turn with a clarifying question.
    Ask,
    /// Profile complete: search, then synthesize.
    Research,
}

impl Route {
    /// Key used in the analyzer's conditional path map.
    pub fn as_str(self) -> &'static str {
        match self {
            Route::Ask => "ask",
            Route::Research => "research",
        }
    }

    pub fn for_profile(profile: &TripProfile) -> Self {
        if profile.is_complete() {
            Route::Research
        } else {
            Route::Ask
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orchestrator stages, in visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Analyzing,
    Researching,
    Synthesizing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Analyzing => "analyzing",
            Stage::Researching => "researching",
            Stage::Synthesizing => "synthesizing",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Raw output of the two searches, passed unfiltered to the architect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResearchPayload {
    pub flights: String,
    pub hotels: String,
}

/// Graph state. The transcript is passed in by value and returned with one assistant turn
/// appended.
#[derive(Debug, Clone, Default)]
pub struct TravelState {
    pub transcript: Vec<Message>,
    pub profile: TripProfile,
    /// Set by the analyzer; `None` before it runs.
    pub route: Option<Route>,
    pub research: Option<ResearchPayload>,
    pub stages: Vec<Stage>,
}

impl TravelState {
    pub fn new(transcript: Vec<Message>) -> Self {
        Self {
            transcript,
            ..Self::default()
        }
    }

    /// Router for the analyzer's conditional edges. Unset route reads as "ask".
    pub fn route_key(&self) -> String {
        self.route.unwrap_or(Route::Ask).as_str().to_string()
    }

    /// Last assistant turn, i.e. this turn's reply once the graph has finished.
    pub fn last_reply(&self) -> Option<&str> {
        match self.transcript.last() {
            Some(Message::Assistant(s)) => Some(s),
            _ => None,
        }
    }
}
