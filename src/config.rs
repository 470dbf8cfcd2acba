//! Environment-driven settings and the shared HTTP client.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::warn;

const DEFAULT_MEDIA_SITE_BASE_URL: &str = "https://sports.yahoo.com";
const DEFAULT_STATS_API_BASE_URL: &str = "https://site.web.api.espn.com/apis/common/v3/sports";
const DEFAULT_ODDS_API_URL: &str = "https://api.prizepicks.com/projections";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Bearer token for the odds API. `None` disables odds lookups.
    pub odds_api_key: Option<String>,
    pub media_site_base_url: String,
    pub stats_api_base_url: String,
    pub odds_api_url: String,
    pub http_timeout: Duration,
    pub http_connect_timeout: Duration,
    pub user_agent: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            odds_api_key: None,
            media_site_base_url: DEFAULT_MEDIA_SITE_BASE_URL.to_string(),
            stats_api_base_url: DEFAULT_STATS_API_BASE_URL.to_string(),
            odds_api_url: DEFAULT_ODDS_API_URL.to_string(),
            http_timeout: Duration::from_secs(30),
            http_connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 5000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` is the process-env case.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Absent, blank or placeholder key means "no odds data", not an error
        let odds_api_key = match lookup("PRIZEPICKS_API_KEY") {
            Some(v) if is_placeholder(v.trim()) => {
                warn!("PRIZEPICKS_API_KEY appears to be a placeholder value; odds lookups disabled");
                None
            }
            Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
            _ => None,
        };

        let secs = |key: &str, default: Duration| -> Duration {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Ok(Self {
            odds_api_key,
            media_site_base_url: base_url(&lookup, "MEDIA_SITE_BASE_URL", DEFAULT_MEDIA_SITE_BASE_URL)?,
            stats_api_base_url: base_url(&lookup, "STATS_API_BASE_URL", DEFAULT_STATS_API_BASE_URL)?,
            odds_api_url: base_url(&lookup, "ODDS_API_URL", DEFAULT_ODDS_API_URL)?,
            http_timeout: secs("HTTP_TIMEOUT_SECONDS", defaults.http_timeout),
            http_connect_timeout: secs("HTTP_CONNECT_TIMEOUT_SECONDS", defaults.http_connect_timeout),
            user_agent: lookup("HTTP_USER_AGENT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            server_host: lookup("SERVER_HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.server_host),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.server_port),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Shared HTTP client for all collectors; timeouts live here, not in the core.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.http_timeout)
            .connect_timeout(self.http_connect_timeout)
            .user_agent(self.user_agent.clone())
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to create HTTP client")
    }
}

fn base_url<F>(lookup: &F, key: &str, default: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) if v.trim().is_empty() => Err(anyhow!("{} is set but empty", key)),
        Some(v) => Ok(v.trim().trim_end_matches('/').to_string()),
        None => Ok(default.to_string()),
    }
}

// Sample keys copied from a template
fn is_placeholder(key: &str) -> bool {
    let key_lower = key.to_lowercase();
    key_lower.contains("change_me") || key_lower.contains("your_") || key_lower.starts_with("sample")
}
