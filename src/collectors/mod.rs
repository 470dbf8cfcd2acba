//! Source collectors.
//!
//! Each collector talks to one external provider and degrades to `None` on
//! any failure (network, non-2xx status, unknown player, bad payload). The
//! aggregator never sees a collector error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::config::Config;
use crate::error::CollectorError;
use crate::model::{MediaSiteStats, Projection, Sport, StatsApiStats};

pub mod media_site;
pub mod odds_api;
pub mod stats_api;

pub use media_site::MediaSiteScraper;
pub use odds_api::OddsApiClient;
pub use stats_api::StatsApiClient;

#[async_trait]
pub trait SourceCollector: Send + Sync {
    type Output: Send + 'static;

    /// Short source name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fetch from the provider. `Ok(None)` means the provider answered but had
    /// nothing for this player.
    async fn fetch(&self, player_name: &str, sport: Sport) -> Result<Option<Self::Output>, CollectorError>;

    /// Fetch, logging and swallowing any failure.
    async fn collect(&self, player_name: &str, sport: Sport) -> Option<Self::Output> {
        match self.fetch(player_name, sport).await {
            Ok(output) => output,
            Err(e) => {
                warn!(source = self.name(), player = player_name, "Error fetching {}: {}", self.name(), e);
                None
            }
        }
    }
}

pub type MediaSiteCollector = Arc<dyn SourceCollector<Output = MediaSiteStats>>;
pub type StatsApiCollector = Arc<dyn SourceCollector<Output = StatsApiStats>>;
pub type OddsCollector = Arc<dyn SourceCollector<Output = Vec<Projection>>>;

/// The three collectors an aggregator fans out to.
#[derive(Clone)]
pub struct Collectors {
    pub media_site: MediaSiteCollector,
    pub stats_api: StatsApiCollector,
    pub odds_api: OddsCollector,
}

impl Collectors {
    /// Build the HTTP-backed collectors. One client is shared by all three.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http_client = config.http_client()?;
        Ok(Self {
            media_site: Arc::new(MediaSiteScraper::new(http_client.clone(), &config.media_site_base_url)),
            stats_api: Arc::new(StatsApiClient::new(http_client.clone(), &config.stats_api_base_url)),
            odds_api: Arc::new(OddsApiClient::new(
                http_client,
                &config.odds_api_url,
                config.odds_api_key.clone(),
            )),
        })
    }
}

/// Read a response body and turn non-2xx into `Ok(None)` after logging.
pub(crate) async fn read_success_body(
    source_name: &'static str,
    response: reqwest::Response,
) -> Result<Option<String>, CollectorError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let err = CollectorError::Status {
            source_name,
            status,
            body: truncate(&body, 200),
        };
        warn!("{} unavailable: {}", source_name, err);
        return Ok(None);
    }

    Ok(Some(body))
}

fn truncate(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    let mut out: String = body.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
