//! # Configuration
//!
//! Environment-driven bot configuration, loaded once at startup.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add MAP_POOL_PATH and PROMPT_TIMEOUT_SECS
//! - 1.0.0: Initial implementation

use anyhow::{anyhow, Result};
use std::time::Duration;

/// Bot configuration, read from the environment (a `.env` file is loaded
/// by the binary before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (DISCORD_TOKEN, required)
    pub discord_token: String,
    /// Role required to invoke /mapvote (MAPVOTE_ROLE_ID, required)
    pub required_role_id: u64,
    /// Guild for development-mode command registration (DISCORD_GUILD_ID)
    pub discord_guild_id: Option<u64>,
    /// Optional YAML map pool; the built-in pool is used when unset (MAP_POOL_PATH)
    pub map_pool_path: Option<String>,
    /// Optional limit on how long a prompt waits for its captain
    /// (PROMPT_TIMEOUT_SECS); unset means wait forever
    pub prompt_timeout_secs: Option<u64>,
    /// Default log filter (LOG_LEVEL, defaults to "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow!("DISCORD_TOKEN environment variable is required"))?;

        let required_role_id = std::env::var("MAPVOTE_ROLE_ID")
            .map_err(|_| anyhow!("MAPVOTE_ROLE_ID environment variable is required"))
            .and_then(|raw| parse_id("MAPVOTE_ROLE_ID", &raw))?;

        let discord_guild_id = match std::env::var("DISCORD_GUILD_ID") {
            Ok(raw) => Some(parse_id("DISCORD_GUILD_ID", &raw)?),
            Err(_) => None,
        };

        let prompt_timeout_secs = match std::env::var("PROMPT_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_id("PROMPT_TIMEOUT_SECS", &raw)?),
            Err(_) => None,
        };

        Ok(Config {
            discord_token,
            required_role_id,
            discord_guild_id,
            map_pool_path: std::env::var("MAP_POOL_PATH").ok(),
            prompt_timeout_secs,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Prompt timeout as a Duration, if one is configured.
    pub fn prompt_timeout(&self) -> Option<Duration> {
        self.prompt_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_id(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow!("{name} must be a numeric id, got '{raw}'"))
}
