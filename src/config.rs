//! Server configuration from environment variables (a `.env` file is honored by the binary).

use crate::error::ConfigError;
use std::collections::HashMap;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// `DATABASE_URL`. When unset the in-memory store is used.
    pub database_url: Option<String>,
    /// `DATABASE_SCHEMA`, quoted wherever it is used in SQL.
    pub database_schema: String,
    /// `DATABASE_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `BIND_ADDR`
    pub bind_addr: String,
    /// `SEED_DEMO_DATA`
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_schema: DEFAULT_SCHEMA.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            bind_addr: DEFAULT_BIND_ADDR.into(),
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value: v.to_string(),
                })?,
            None => defaults.max_connections,
        };
        let seed_demo_data = match get("SEED_DEMO_DATA") {
            Some(v) => parse_flag(v).ok_or_else(|| ConfigError::Invalid {
                key: "SEED_DEMO_DATA",
                value: v.to_string(),
            })?,
            None => defaults.seed_demo_data,
        };

        Ok(Self {
            database_url: get("DATABASE_URL").map(String::from),
            database_schema: get("DATABASE_SCHEMA").map(String::from).unwrap_or(defaults.database_schema),
            max_connections,
            bind_addr: get("BIND_ADDR").map(String::from).unwrap_or(defaults.bind_addr),
            seed_demo_data,
        })
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
