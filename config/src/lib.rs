//! Process environment bootstrap for Voyage.
//!
//! Reads the project `.env` and the `[env]` table of
//! `$XDG_CONFIG_HOME/<app>/config.toml`, then exports every key that is not
//! already present in the process environment. Precedence is
//! **existing env > .env > XDG**, so a shell export always wins over files.
//!
//! Typical startup:
//!
//! ```rust,no_run
//! config::load_and_apply("voyage", None).ok();
//! let key = std::env::var("GROQ_API_KEY");
//! ```

mod dotenv;
mod xdg_toml;

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub use xdg_toml::config_file_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Loads `.env` (from `override_dir` or the current directory) and the XDG config file for
/// `app_name`, then sets each variable that is missing from the process environment.
///
/// Returns the keys that were exported, sorted, so callers can log what came from files.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<Vec<String>, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    let pending = resolve_missing(&dotenv_map, &xdg_map, |k| std::env::var_os(k).is_some());
    let mut applied = Vec::with_capacity(pending.len());
    for (key, value) in pending {
        std::env::set_var(&key, value);
        applied.push(key);
    }
    Ok(applied)
}

/// Picks the value to export for every key not already set: `.env` first, then XDG.
fn resolve_missing(
    dotenv_map: &HashMap<String, String>,
    xdg_map: &HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    let mut keys: Vec<&String> = dotenv_map.keys().chain(xdg_map.keys()).collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .filter(|k| !is_set(k))
        .filter_map(|k| {
            dotenv_map
                .get(k)
                .or_else(|| xdg_map.get(k))
                .map(|v| (k.clone(), v.clone()))
        })
        .collect()
}
