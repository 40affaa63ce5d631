use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::controller::InFlightPolicy;

const DEFAULT_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration loaded from environment variables.
/// Every value has a default, so an empty environment is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub analyzer_url: String,
    pub timeout: Duration,
    pub policy: InFlightPolicy,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` is a thin wrapper.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs = match lookup("ANALYZER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("ANALYZER_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("ANALYZER_TIMEOUT_SECS must be greater than zero");
        }

        let policy = match lookup("ANALYZER_POLICY") {
            Some(raw) => parse_policy(&raw)?,
            None => InFlightPolicy::default(),
        };

        Ok(Config {
            analyzer_url: lookup("ANALYZER_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            policy,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

pub fn parse_policy(raw: &str) -> Result<InFlightPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "reject" => Ok(InFlightPolicy::Reject),
        "supersede" => Ok(InFlightPolicy::Supersede),
        other => bail!("ANALYZER_POLICY must be 'reject' or 'supersede', got '{other}'"),
    }
}
