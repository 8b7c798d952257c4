use std::env;

use anyhow::Context;

/// Runtime settings, read from the environment after `.env` is loaded.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,
    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: lookup("JWT_SECRET").context("JWT_SECRET must be set")?,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api/v1".to_string()),
        })
    }
}
