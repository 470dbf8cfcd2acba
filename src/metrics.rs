//! Recent-window averages the scorer works from.

use serde::Serialize;

use crate::model::{PlayerRecord, RecentGame, Sport};

/// Size of the recent-games window kept for scoring and display.
pub const RECENT_WINDOW: usize = 5;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MetricsSummary {
    pub avg_performance: f64,
    /// First `RECENT_WINDOW` entries by list position, not by date.
    pub recent_games: Vec<RecentGame>,
}

/// Reduce a record to an average and a bounded window of games.
///
/// Basketball averages `points` over media-site games followed by stats-API
/// games, skipping entries without `points`. Football averages
/// `passing_yards + rushing_yards` over stats-API games only, with missing
/// yardage counted as zero. An empty series averages to 0.
pub fn compute_metrics(record: &PlayerRecord, sport: Sport) -> MetricsSummary {
    match sport {
        Sport::Basketball => {
            let games: Vec<RecentGame> = record
                .media_games()
                .iter()
                .chain(record.stats_games())
                .cloned()
                .collect();
            let points: Vec<f64> = games.iter().filter_map(|g| g.points).collect();
            MetricsSummary {
                avg_performance: mean(&points),
                recent_games: window(games),
            }
        }
        Sport::Football => {
            let games = record.stats_games().to_vec();
            let yards: Vec<f64> = games
                .iter()
                .map(|g| g.passing_yards.unwrap_or(0.0) + g.rushing_yards.unwrap_or(0.0))
                .collect();
            MetricsSummary {
                avg_performance: mean(&yards),
                recent_games: window(games),
            }
        }
    }
}

fn window(mut games: Vec<RecentGame>) -> Vec<RecentGame> {
    games.truncate(RECENT_WINDOW);
    games
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
