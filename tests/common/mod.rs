#![allow(dead_code)]

use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use prop_analyzer::collectors::{Collectors, SourceCollector};
use prop_analyzer::error::CollectorError;
use prop_analyzer::model::{MediaSiteStats, Projection, RecentGame, Sport, StatsApiStats};

/// Returns the same value for every player, counting calls.
pub struct Fixed<T> {
    value: Option<T>,
    pub calls: Arc<AtomicUsize>,
}

impl<T> Fixed<T> {
    pub fn new(value: Option<T>) -> Self {
        Self {
            value,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> SourceCollector for Fixed<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn fetch(&self, _player_name: &str, _sport: Sport) -> Result<Option<T>, CollectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.clone())
    }
}

/// Always fails the way an unreachable provider would.
pub struct Failing<T>(PhantomData<fn() -> T>);

impl<T> Failing<T> {
    pub fn new() -> Self {
        Failing(PhantomData)
    }
}

#[async_trait]
impl<T: Send + 'static> SourceCollector for Failing<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch(&self, _player_name: &str, _sport: Sport) -> Result<Option<T>, CollectorError> {
        Err(CollectorError::Parse {
            source_name: "failing",
            reason: "connection refused".to_string(),
        })
    }
}

pub fn points(p: f64) -> RecentGame {
    RecentGame {
        points: Some(p),
        ..RecentGame::default()
    }
}

pub fn media(games: Vec<RecentGame>) -> MediaSiteStats {
    MediaSiteStats {
        recent_games: games,
        ..MediaSiteStats::default()
    }
}

pub fn stats(games: Vec<RecentGame>) -> StatsApiStats {
    StatsApiStats {
        recent_games: games,
        ..StatsApiStats::default()
    }
}

pub fn collectors(
    media_site: Option<MediaSiteStats>,
    stats_api: Option<StatsApiStats>,
    odds: Option<Vec<Projection>>,
) -> Collectors {
    Collectors {
        media_site: Arc::new(Fixed::new(media_site)),
        stats_api: Arc::new(Fixed::new(stats_api)),
        odds_api: Arc::new(Fixed::new(odds)),
    }
}
