//! Over/Under call and heuristic confidence.
//!
//! The confidence series always reads `points`, whatever the sport. Football
//! windows carry no `points`, so their series is all zeros: consistency 0,
//! trend 0, and confidence lands on 40.

use serde::Serialize;

use crate::metrics::{mean, MetricsSummary};
use crate::model::Recommendation;

const BASE_CONFIDENCE: f64 = 50.0;
const CONSISTENCY_WEIGHT: f64 = 20.0;
const TREND_WEIGHT: f64 = 10.0;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Score {
    pub recommendation: Recommendation,
    pub confidence: f64,
}

pub fn score(metrics: &MetricsSummary, betting_line: f64) -> Score {
    let performances: Vec<f64> = metrics
        .recent_games
        .iter()
        .map(|g| g.points.unwrap_or(0.0))
        .collect();

    Score {
        recommendation: recommend(metrics.avg_performance, betting_line),
        confidence: confidence(population_std_dev(&performances), trend(&performances)),
    }
}

/// Strictly above the line is Over; a tie is Under.
pub fn recommend(avg_performance: f64, betting_line: f64) -> Recommendation {
    if avg_performance > betting_line {
        Recommendation::Over
    } else {
        Recommendation::Under
    }
}

/// Population standard deviation; 0 for an empty series.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// First listed minus last listed; 0 with fewer than two entries.
pub fn trend(values: &[f64]) -> f64 {
    match values {
        [first, .., last] => first - last,
        _ => 0.0,
    }
}

/// `50 + 20/consistency (if consistency > 0) ± 10`, clamped to [0, 100].
/// A zero trend takes the minus branch.
pub fn confidence(consistency: f64, trend: f64) -> f64 {
    let mut confidence = BASE_CONFIDENCE;
    if consistency > 0.0 {
        confidence += CONSISTENCY_WEIGHT / consistency;
    }
    if trend > 0.0 {
        confidence += TREND_WEIGHT;
    } else {
        confidence -= TREND_WEIGHT;
    }
    confidence.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecentGame;

    fn summary(avg: f64, points: &[Option<f64>]) -> MetricsSummary {
        MetricsSummary {
            avg_performance: avg,
            recent_games: points
                .iter()
                .map(|p| RecentGame {
                    points: *p,
                    ..RecentGame::default()
                })
                .collect(),
        }
    }

    #[test]
    fn tie_is_under() {
        assert_eq!(recommend(24.0, 24.0), Recommendation::Under);
        assert_eq!(recommend(24.5, 24.0), Recommendation::Over);
        assert_eq!(recommend(23.5, 24.0), Recommendation::Under);
    }

    #[test]
    fn trend_is_first_minus_last() {
        assert_eq!(trend(&[20.0, 10.0, 30.0]), -10.0);
        assert_eq!(trend(&[30.0, 10.0]), 20.0);
        assert_eq!(trend(&[30.0]), 0.0);
        assert_eq!(trend(&[]), 0.0);
    }

    #[test]
    fn std_dev_is_population() {
        assert_eq!(population_std_dev(&[]), 0.0);
        assert_eq!(population_std_dev(&[5.0, 5.0]), 0.0);
        assert_eq!(population_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
    }

    #[test]
    fn declining_window_takes_decrement_branch() {
        // std dev of [20, 10, 30] is sqrt(200/3)
        let s = score(&summary(20.0, &[Some(20.0), Some(10.0), Some(30.0)]), 15.0);
        let expected = 50.0 + 20.0 / (200.0f64 / 3.0).sqrt() - 10.0;
        assert!((s.confidence - expected).abs() < 1e-9);
        assert_eq!(s.recommendation, Recommendation::Over);
    }

    #[test]
    fn improving_window_takes_increment_branch() {
        let s = score(&summary(20.0, &[Some(30.0), Some(10.0)]), 25.0);
        // std dev 10, trend +20
        assert_eq!(s.confidence, 50.0 + 2.0 + 10.0);
        assert_eq!(s.recommendation, Recommendation::Under);
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(confidence(1e-9, 5.0), 100.0);
        assert_eq!(confidence(0.0, 0.0), 40.0);
        assert_eq!(confidence(0.0, 1.0), 60.0);
        for consistency in [0.0, 1e-12, 0.01, 0.2, 1.0, 3.0, 50.0, 1e9] {
            for t in [-1e6, -10.0, 0.0, 10.0, 1e6] {
                let c = confidence(consistency, t);
                assert!((0.0..=100.0).contains(&c), "{consistency} {t} -> {c}");
            }
        }
    }

    #[test]
    fn missing_points_read_as_zero() {
        // football-shaped window: no points anywhere
        let s = score(&summary(182.5, &[None, None]), 300.0);
        assert_eq!(s.confidence, 40.0);
        assert_eq!(s.recommendation, Recommendation::Under);
    }
}
