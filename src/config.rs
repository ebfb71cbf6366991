//! Process configuration, read once from the environment at startup.

use crate::{Error, Result};
use std::time::Duration;

const DEFAULT_TEXT_API_URL: &str = "https://text.pollinations.ai";
const DEFAULT_IMAGE_API_URL: &str = "https://gen.pollinations.ai";
const DEFAULT_IMAGE_MODEL: &str = "flux";
const DEFAULT_SUPABASE_TABLE: &str = "generations";

/// Credentials for the optional Supabase generation log.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
    pub table: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub text_api_url: String,
    pub image_api_url: String,
    pub image_model: String,
    /// `None` disables generation logging.
    pub supabase: Option<SupabaseConfig>,
    pub host: String,
    pub port: u16,
    /// `None` leaves outbound calls without a timeout.
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment.
    ///
    /// | Env Var                 | Default                         |
    /// |-------------------------|---------------------------------|
    /// | `POLLINATIONS_API_KEY`  | required                        |
    /// | `TEXT_API_URL`          | `https://text.pollinations.ai`  |
    /// | `IMAGE_API_URL`         | `https://gen.pollinations.ai`   |
    /// | `IMAGE_MODEL`           | `flux`                          |
    /// | `SUPABASE_URL`          | unset (logging disabled)        |
    /// | `SUPABASE_KEY`          | unset (logging disabled)        |
    /// | `SUPABASE_TABLE`        | `generations`                   |
    /// | `HOST`                  | `127.0.0.1`                     |
    /// | `PORT`                  | `5000`                          |
    /// | `UPSTREAM_TIMEOUT_SECS` | unset (no timeout)              |
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = var("POLLINATIONS_API_KEY")
            .ok_or_else(|| Error::Config("POLLINATIONS_API_KEY not set".to_string()))?;

        let supabase = match (var("SUPABASE_URL"), var("SUPABASE_KEY")) {
            (Some(url), Some(key)) => Some(SupabaseConfig {
                url: url.trim_end_matches('/').to_string(),
                key,
                table: var("SUPABASE_TABLE").unwrap_or_else(|| DEFAULT_SUPABASE_TABLE.to_string()),
            }),
            _ => None,
        };

        let port: u16 = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a valid port number, got '{}'", raw)))?,
            None => 5000,
        };

        let upstream_timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.parse().map_err(|_| {
                Error::Config(format!(
                    "UPSTREAM_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?)),
            None => None,
        };

        Ok(Self {
            api_key,
            text_api_url: var("TEXT_API_URL")
                .unwrap_or_else(|| DEFAULT_TEXT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            image_api_url: var("IMAGE_API_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            image_model: var("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            supabase,
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            upstream_timeout,
        })
    }

    /// Shared HTTP client for every outbound collaborator.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
