//! Typed runtime settings read from the process environment.
//!
//! The `config` crate fills the environment from `.env` and the XDG config file first; this
//! module only reads and validates. `GROQ_API_KEY` is required and checked at startup, so a
//! missing key fails before the first turn instead of on the first model call.

use std::collections::HashMap;

use thiserror::Error;

pub const ENV_API_KEY: &str = "GROQ_API_KEY";
pub const ENV_API_BASE: &str = "VOYAGE_API_BASE";
pub const ENV_MODEL: &str = "VOYAGE_MODEL";
pub const ENV_SEARCH_REGION: &str = "VOYAGE_SEARCH_REGION";
pub const ENV_SEARCH_MAX_RESULTS: &str = "VOYAGE_SEARCH_MAX_RESULTS";
pub const ENV_SEARCH_URL: &str = "VOYAGE_SEARCH_URL";
pub const ENV_EXA_API_KEY: &str = "EXA_API_KEY";

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_SEARCH_REGION: &str = "it-it";
pub const DEFAULT_SEARCH_MAX_RESULTS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set; add it to .env or the environment")]
    MissingApiKey(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Everything a [`TravelAgent`](crate::travel::TravelAgent) needs from the outside world.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    /// Always 0: extraction and synthesis must be deterministic.
    pub temperature: f32,
    pub search_region: String,
    pub search_max_results: usize,
    /// Overrides the search provider endpoint (tests, proxies).
    pub search_url: Option<String>,
    /// When set, web search goes through Exa instead of DuckDuckGo.
    pub exa_api_key: Option<String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("search_region", &self.search_region)
            .field("search_max_results", &self.search_max_results)
            .field("search_url", &self.search_url)
            .field("exa_api_key", &self.exa_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings from an explicit map (tests, embedding).
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(ENV_API_KEY)
            .filter(|k| !is_placeholder_key(k))
            .ok_or(ConfigError::MissingApiKey(ENV_API_KEY))?;

        let search_max_results = match get(ENV_SEARCH_MAX_RESULTS) {
            None => DEFAULT_SEARCH_MAX_RESULTS,
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_SEARCH_MAX_RESULTS,
                    value: raw,
                })?,
        };

        let search_region = get(ENV_SEARCH_REGION).unwrap_or_else(|| DEFAULT_SEARCH_REGION.to_string());
        if !search_region.contains('-') {
            return Err(ConfigError::InvalidValue {
                key: ENV_SEARCH_REGION,
                value: search_region,
            });
        }

        Ok(Self {
            api_key,
            api_base: get(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: 0.0,
            search_region,
            search_max_results,
            search_url: get(ENV_SEARCH_URL),
            exa_api_key: get(ENV_EXA_API_KEY),
        })
    }
}

/// Template values such as `insert-your-key-here` count as missing.
fn is_placeholder_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    lower.contains("insert") || lower.contains("inserisci") || lower.contains("your-key")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let s = Settings::from_map(&vars(&[(ENV_API_KEY, "gsk_live")])).unwrap();
        assert_eq!(s.api_key, "gsk_live");
        assert_eq!(s.api_base, DEFAULT_API_BASE);
        assert_eq!(s.model, DEFAULT_MODEL);
        assert_eq!(s.temperature, 0.0);
        assert_eq!(s.search_region, "it-it");
        assert_eq!(s.search_max_results, 5);
        assert!(s.search_url.is_none());
        assert!(s.exa_api_key.is_none());
    }

    #[test]
    fn missing_key_is_a_startup_error() {
        let err = Settings::from_map(&HashMap::new()).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey(ENV_API_KEY));
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn placeholder_key_counts_as_missing() {
        for placeholder in ["insert-your-key-here", "inserisci_qui", "  "] {
            let err = Settings::from_map(&vars(&[(ENV_API_KEY, placeholder)])).unwrap_err();
            assert_eq!(err, ConfigError::MissingApiKey(ENV_API_KEY), "{}", placeholder);
        }
    }

    #[test]
    fn overrides_are_read() {
        let s = Settings::from_map(&vars(&[
            (ENV_API_KEY, "k"),
            (ENV_MODEL, "llama3-70b-8192"),
            (ENV_SEARCH_REGION, "de-de"),
            (ENV_SEARCH_MAX_RESULTS, "3"),
            (ENV_SEARCH_URL, "http://127.0.0.1:9/html/"),
            (ENV_EXA_API_KEY, "exa"),
        ]))
        .unwrap();
        assert_eq!(s.model, "llama3-70b-8192");
        assert_eq!(s.search_region, "de-de");
        assert_eq!(s.search_max_results, 3);
        assert_eq!(s.search_url.as_deref(), Some("http://127.0.0.1:9/html/"));
        assert_eq!(s.exa_api_key.as_deref(), Some("exa"));
    }

    #[test]
    fn invalid_numbers_and_regions_are_rejected() {
        let err = Settings::from_map(&vars(&[(ENV_API_KEY, "k"), (ENV_SEARCH_MAX_RESULTS, "zero")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_SEARCH_MAX_RESULTS));

        let err = Settings::from_map(&vars(&[(ENV_API_KEY, "k"), (ENV_SEARCH_REGION, "italy")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_SEARCH_REGION));
    }

    #[test]
    fn debug_redacts_keys() {
        let s = Settings::from_map(&vars(&[(ENV_API_KEY, "gsk_secret"), (ENV_EXA_API_KEY, "exa_secret")]))
            .unwrap();
        let dbg = format!("{:?}", s);
        assert!(!dbg.contains("gsk_secret"));
        assert!(!dbg.contains("exa_secret"));
    }
}
