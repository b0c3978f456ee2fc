//! Trip profile: the six attributes collected before any search runs.
//!
//! Each field is `None` until the user has given a value. On the wire (model JSON, `--json`
//! output, prompts) an absent field is the literal marker [`MISSING`]; `"missing"`, empty
//! strings and `null` all read back as `None`. No numeric or date validation is done: any
//! non-empty text is a value.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder for a field the user has not provided.
pub const MISSING: &str = "missing";

/// Identifies one profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Origin,
    Destination,
    Dates,
    Budget,
    Interests,
    Group,
}

impl ProfileField {
    pub const ALL: [ProfileField; 6] = [
        ProfileField::Origin,
        ProfileField::Destination,
        ProfileField::Dates,
        ProfileField::Budget,
        ProfileField::Interests,
        ProfileField::Group,
    ];

    /// JSON key used in the extraction schema.
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Origin => "origin",
            ProfileField::Destination => "destination",
            ProfileField::Dates => "dates",
            ProfileField::Budget => "budget",
            ProfileField::Interests => "interests",
            ProfileField::Group => "group",
        }
    }

    /// Human label for clarifying questions and the profile display.
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Origin => "departure city",
            ProfileField::Destination => "destination",
            ProfileField::Dates => "travel dates",
            ProfileField::Budget => "budget",
            ProfileField::Interests => "interests",
            ProfileField::Group => "group size",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The six trip attributes. Replaced in full by every extraction; no history is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripProfile {
    #[serde(default, with = "marker")]
    pub origin: Option<String>,
    #[serde(default, with = "marker")]
    pub destination: Option<String>,
    #[serde(default, with = "marker")]
    pub dates: Option<String>,
    #[serde(default, with = "marker")]
    pub budget: Option<String>,
    #[serde(default, with = "marker")]
    pub interests: Option<String>,
    #[serde(default, with = "marker")]
    pub group: Option<String>,
}

impl TripProfile {
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Origin => self.origin.as_deref(),
            ProfileField::Destination => self.destination.as_deref(),
            ProfileField::Dates => self.dates.as_deref(),
            ProfileField::Budget => self.budget.as_deref(),
            ProfileField::Interests => self.interests.as_deref(),
            ProfileField::Group => self.group.as_deref(),
        }
    }

    /// Sets a field; marker-like values clear it.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = normalize(Some(value.into()));
        let slot = match field {
            ProfileField::Origin => &mut self.origin,
            ProfileField::Destination => &mut self.destination,
            ProfileField::Dates => &mut self.dates,
            ProfileField::Budget => &mut self.budget,
            ProfileField::Interests => &mut self.interests,
            ProfileField::Group => &mut self.group,
        };
        *slot = value;
    }

    /// Value or the [`MISSING`] marker, for prompts and queries.
    pub fn display_value(&self, field: ProfileField) -> &str {
        self.get(field).unwrap_or(MISSING)
    }

    /// Fields still without a value, in schema order.
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// True once all six fields have a value.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// One `Label: value` line per field.
    pub fn summary(&self) -> String {
        ProfileField::ALL
            .into_iter()
            .map(|f| format!("{}: {}", f.label(), self.display_value(f)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(MISSING))
}

/// Serde adapter mapping `None` <-> `"missing"`.
mod marker {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(MISSING))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(d)?;
        Ok(normalize(raw.and_then(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })))
    }
}
