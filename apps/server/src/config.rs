use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub identity_base_url: String,
    pub session_cache_ttl_secs: u64,
    pub retry_max_attempts: u32,
    pub retry_initial_delay_ms: u64,
}

impl Config {
    /// Reads the process environment. `DATABASE_URL` is the only variable
    /// without a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            port: parsed("PORT", "8080")?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            identity_base_url: var_or("IDENTITY_BASE_URL", "http://localhost:8787"),
            session_cache_ttl_secs: parsed("SESSION_CACHE_TTL_SECS", "240")?,
            retry_max_attempts: parsed("RETRY_MAX_ATTEMPTS", "3")?,
            retry_initial_delay_ms: parsed("RETRY_INITIAL_DELAY_MS", "1000")?,
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    var_or(name, default)
        .parse()
        .map_err(|_| ConfigError::Invalid(name))
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{name} is not set"),
            ConfigError::Invalid(name) => write!(f, "{name} has an unusable value"),
        }
    }
}

impl std::error::Error for ConfigError {}
