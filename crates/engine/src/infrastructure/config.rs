//! Engine configuration from the environment.
//!
//! | Variable               | Default          |
//! |------------------------|------------------|
//! | `SERVER_HOST`          | `0.0.0.0`        |
//! | `SERVER_PORT` / `PORT` | `3000`           |
//! | `DATABASE_URL`         | `sqlite:arena.db`|
//! | `FIGHT_MAX_ROUNDS`     | `1000`           |
//! | `FIGHT_TARGET_POLICY`  | `round_robin`    |
//! | `FIGHT_ACTION_POLICY`  | `weapon`         |
//! | `CORS_ALLOWED_ORIGINS` | unset (no CORS)  |

use std::fmt;
use std::str::FromStr;

use arena_domain::FightConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite:arena.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub fight: FightConfig,
    /// Comma separated origins, or `*`.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            fight: FightConfig::default(),
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup.
    ///
    /// Blank values count as unset. Values that do not parse fall back to the
    /// default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let server_port = match get("SERVER_PORT").or_else(|| get("PORT")) {
            Some(raw) => parsed_or("SERVER_PORT", &raw, defaults.server_port),
            None => defaults.server_port,
        };

        let max_rounds = match get("FIGHT_MAX_ROUNDS") {
            Some(raw) => match parsed_or("FIGHT_MAX_ROUNDS", &raw, defaults.fight.max_rounds) {
                0 => {
                    tracing::warn!(
                        value = %raw,
                        "FIGHT_MAX_ROUNDS must be at least 1, using default"
                    );
                    defaults.fight.max_rounds
                }
                n => n,
            },
            None => defaults.fight.max_rounds,
        };

        let target_policy = match get("FIGHT_TARGET_POLICY") {
            Some(raw) => parsed_or("FIGHT_TARGET_POLICY", &raw, defaults.fight.target_policy),
            None => defaults.fight.target_policy,
        };

        let action_policy = match get("FIGHT_ACTION_POLICY") {
            Some(raw) => parsed_or("FIGHT_ACTION_POLICY", &raw, defaults.fight.action_policy),
            None => defaults.fight.action_policy,
        };

        Self {
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            fight: FightConfig {
                max_rounds,
                target_policy,
                action_policy,
            },
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        }
    }
}

fn parsed_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                key,
                value = %raw,
                error = %e,
                default = %default,
                "Invalid setting, using default"
            );
            default
        }
    }
}
