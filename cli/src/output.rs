//! Rendering of turn results for the terminal and for `--json`.

use serde_json::json;
use voyage::{ProfileField, TripProfile, TurnOutcome};

/// `{ "reply", "route", "stages", "profile" }` for one turn.
pub fn turn_json(outcome: &TurnOutcome) -> serde_json::Value {
    json!({
        "reply": outcome.reply,
        "route": outcome.route,
        "stages": outcome.stages,
        "profile": outcome.profile,
    })
}

/// Profile block printed after a reply (`--show-profile`) or by `/profile`.
pub fn profile_view(profile: &TripProfile) -> String {
    let width = ProfileField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);
    let mut out = String::from("Trip profile:\n");
    for field in ProfileField::ALL {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            field.label(),
            profile.display_value(field),
        ));
    }
    out
}
