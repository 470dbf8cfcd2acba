//! Stats-provider API client (JSON player profiles).

use async_trait::async_trait;
use tracing::{debug, info};

use super::{read_success_body, SourceCollector};
use crate::error::CollectorError;
use crate::model::{Sport, StatsApiStats};

const SOURCE: &str = "stats-api";

pub struct StatsApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl StatsApiClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn players_url(&self, sport: Sport) -> String {
        format!("{}/{}/players", self.base_url, sport.as_str())
    }
}

/// Parse a player profile. Unknown fields are ignored, missing ones default.
pub fn parse_profile(body: &str) -> Result<StatsApiStats, CollectorError> {
    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl SourceCollector for StatsApiClient {
    type Output = StatsApiStats;

    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch(&self, player_name: &str, sport: Sport) -> Result<Option<StatsApiStats>, CollectorError> {
        let url = self.players_url(sport);
        debug!("Fetching stats-api profile for {} from {}", player_name, url);

        let response = self
            .client
            .get(&url)
            .query(&[("name", player_name)])
            .send()
            .await?;

        // 404 for an unknown player lands here as `None`
        let Some(body) = read_success_body(SOURCE, response).await? else {
            return Ok(None);
        };

        let stats = parse_profile(&body)?;
        info!("Fetched {} games from stats api for {}", stats.recent_games.len(), player_name);
        Ok(Some(stats))
    }
}
