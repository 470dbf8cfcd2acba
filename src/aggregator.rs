//! Fan-out to the three collectors and fan-in into one `PlayerRecord`.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::collectors::{Collectors, SourceCollector};
use crate::error::AnalyzeResult;
use crate::model::{PlayerRecord, Sport};

/// Owns the collector handles for the lifetime of an analyzer.
///
/// The session guard gives each request exclusive use of the collectors;
/// concurrent callers queue on it. The spawned media task holds a share of
/// the guard, so a cancelled caller keeps the session until that task ends.
pub struct Aggregator {
    collectors: Collectors,
    session: Arc<Mutex<()>>,
}

impl Aggregator {
    pub fn new(collectors: Collectors) -> Self {
        Self {
            collectors,
            session: Arc::new(Mutex::new(())),
        }
    }

    /// Gather everything the sources know about `player_name`.
    ///
    /// The media-site fetch runs as its own task while the stats-API and
    /// odds-API collectors are awaited in turn; the task is joined before
    /// the record is built. Missing data is never an error here; only a
    /// failed task join is.
    pub async fn get_complete_player_data(&self, player_name: &str, sport: Sport) -> AnalyzeResult<PlayerRecord> {
        let session = Arc::new(Arc::clone(&self.session).lock_owned().await);
        let start = Instant::now();

        let media_site = Arc::clone(&self.collectors.media_site);
        let name = player_name.to_string();
        let task_session = Arc::clone(&session);
        let media_task = tokio::spawn(async move {
            let _session = task_session;
            media_site.collect(&name, sport).await
        });

        let stats_api = self.collectors.stats_api.collect(player_name, sport).await;
        let odds = self.collectors.odds_api.collect(player_name, sport).await;

        let media_site = media_task.await?;

        debug!(
            media_site = media_site.is_some(),
            stats_api = stats_api.is_some(),
            odds = odds.is_some(),
            "Sources collected"
        );

        let record = PlayerRecord {
            player_name: player_name.to_string(),
            sport,
            media_site,
            stats_api,
            odds,
            fetched_at: Utc::now(),
        };

        info!(
            "Aggregated {} media-site + {} stats-api games for {} in {:?}",
            record.media_games().len(),
            record.stats_games().len(),
            player_name,
            start.elapsed()
        );

        drop(session);
        Ok(record)
    }

    /// Release the collector handles. Waits for any in-flight request first.
    pub async fn close(self) {
        let _session = self.session.lock().await;
        info!("Collector sessions released");
    }
}
