//! Prompts and query templates for the travel graph.

use crate::profile::{ProfileField, TripProfile};

use super::state::ResearchPayload;

/// System prompt for the analyzer. The model answers with one JSON object.
pub const ANALYZER_SYSTEM_PROMPT: &str = r#"You are the intake step of a travel agency. Read the whole conversation and extract the trip details the user has given so far.

Answer with exactly one JSON object and nothing else:
{"origin": "...", "destination": "...", "dates": "...", "budget": "...", "interests": "...", "group": "...", "reply": "..."}

Rules:
- origin is the departure city, destination is where the user wants to go. Never swap them.
- dates, budget, interests and group (number of travellers) are free text in the user's words.
- Use the exact string "missing" for any detail the user has not stated. Do not guess.
- reply is your next message to the user. If any field is "missing", ask for the missing details in one short, friendly message. If nothing is missing, briefly confirm the details."#;

/// Question used when the model left `reply` empty but details are still missing.
pub fn clarifying_question(missing: &[ProfileField]) -> String {
    let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
    let list = match labels.as_slice() {
        [] => return "Could you tell me a bit more about your trip?".to_string(),
        [one] => (*one).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    };
    format!("To plan your trip I still need your {list}. Could you tell me?")
}

pub fn flights_query(profile: &TripProfile) -> String {
    format!(
        "real flights prices and airlines from {} to {} {}",
        profile.display_value(ProfileField::Origin),
        profile.display_value(ProfileField::Destination),
        profile.display_value(ProfileField::Dates),
    )
}

pub fn hotels_query(profile: &TripProfile) -> String {
    format!(
        "real hotel names and price per night in {} {} for {}",
        profile.display_value(ProfileField::Destination),
        profile.display_value(ProfileField::Dates),
        profile.display_value(ProfileField::Group),
    )
}

/// Single prompt for the synthesis call.
pub fn architect_prompt(profile: &TripProfile, research: &ResearchPayload) -> String {
    let origin = profile.display_value(ProfileField::Origin);
    let destination = profile.display_value(ProfileField::Destination);
    let budget = profile.display_value(ProfileField::Budget);
    format!(
        "You are a travel agent. Answer only for this request.\n\
         \n\
         TRAVELLER DETAILS:\n{summary}\n\
         \n\
         WEB SEARCH RESULTS (FLIGHTS):\n{flights}\n\
         \n\
         WEB SEARCH RESULTS (HOTELS):\n{hotels}\n\
         \n\
         RULES:\n\
         1. The destination is {destination}. Do not propose {origin} or any other city as the destination; {origin} is only the departure city.\n\
         2. The total cost must stay within the budget of {budget}.\n\
         3. If the web results are scarce or missing, use your own knowledge to name real airlines flying to {destination} and real hotels in {destination} that fit the budget.\n\
         4. List HOTEL NAMES, FLIGHTS and a DAY-BY-DAY ITINERARY.",
        summary = profile.summary(),
        flights = research.flights,
        hotels = research.hotels,
    )
}
