//! Entry point shared by the CLI, the HTTP service and the dashboard.

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::aggregator::Aggregator;
use crate::collectors::Collectors;
use crate::config::Config;
use crate::context;
use crate::error::{AnalyzeError, AnalyzeResult};
use crate::metrics::compute_metrics;
use crate::model::{AnalysisReport, AnalysisResult, PlayerRecord, Sport};
use crate::scoring::score;

pub struct PropAnalyzer {
    aggregator: Aggregator,
}

impl PropAnalyzer {
    pub fn new(collectors: Collectors) -> Self {
        Self {
            aggregator: Aggregator::new(collectors),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(Collectors::from_config(config)?))
    }

    /// Analyze `player_name` against `betting_line`. Never fails: every error
    /// becomes `{error, success: false}`.
    pub async fn analyze(&self, player_name: &str, betting_line: f64, sport: Sport) -> AnalysisResult {
        let request_id = Uuid::new_v4();
        let span = info_span!("analyze", %request_id, player = player_name, %sport);

        async move {
            match self.try_analyze(player_name, betting_line, sport).await {
                Ok(report) => {
                    info!(
                        "{} {} {:.1} (avg {:.2}, confidence {:.1})",
                        player_name, report.recommendation, betting_line, report.avg_performance, report.confidence_score
                    );
                    AnalysisResult::Success(report)
                }
                Err(e @ AnalyzeError::NoData(_)) => {
                    warn!("{}", e);
                    AnalysisResult::failure(e)
                }
                Err(e) => {
                    error!("Error analyzing player: {}", e);
                    AnalysisResult::failure(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_analyze(&self, player_name: &str, betting_line: f64, sport: Sport) -> AnalyzeResult<AnalysisReport> {
        if player_name.trim().is_empty() {
            return Err(AnalyzeError::MissingPlayer);
        }
        if !betting_line.is_finite() {
            return Err(AnalyzeError::InvalidLine(betting_line));
        }

        let record = self.aggregator.get_complete_player_data(player_name, sport).await?;
        assemble(&record, betting_line, sport)
    }

    /// Release collector resources once no request is in flight.
    pub async fn close(self) {
        self.aggregator.close().await;
    }
}

/// Metrics, score and context for an aggregated record.
pub fn assemble(record: &PlayerRecord, betting_line: f64, sport: Sport) -> AnalyzeResult<AnalysisReport> {
    if !record.has_stats() {
        return Err(AnalyzeError::NoData(record.player_name.clone()));
    }

    let metrics = compute_metrics(record, sport);
    let score = score(&metrics, betting_line);

    Ok(AnalysisReport {
        player_name: record.player_name.clone(),
        avg_performance: metrics.avg_performance,
        betting_line,
        performance_diff: metrics.avg_performance - betting_line,
        recommendation: score.recommendation,
        confidence_score: score.confidence,
        recent_games: metrics.recent_games,
        injury_status: context::injury_status(record),
        matchup_analysis: context::matchup(record),
        success: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MediaSiteStats, RecentGame, Recommendation, StatsApiStats};

    fn points(p: f64) -> RecentGame {
        RecentGame {
            points: Some(p),
            ..RecentGame::default()
        }
    }

    #[test]
    fn basketball_scenario() {
        let mut record = PlayerRecord::new("LeBron James", Sport::Basketball);
        record.media_site = Some(MediaSiteStats {
            recent_games: vec![points(25.0), points(30.0)],
            ..MediaSiteStats::default()
        });
        record.stats_api = Some(StatsApiStats {
            recent_games: vec![points(20.0)],
            ..StatsApiStats::default()
        });

        let report = assemble(&record, 24.0, Sport::Basketball).unwrap();
        assert_eq!(report.avg_performance, 25.0);
        assert_eq!(report.performance_diff, 1.0);
        assert_eq!(report.recommendation, Recommendation::Over);
        assert_eq!(report.recent_games.len(), 3);
        assert!(report.success);
        assert_eq!(report.injury_status.status, "Unknown");
    }

    #[test]
    fn football_scenario() {
        let mut record = PlayerRecord::new("Patrick Mahomes", Sport::Football);
        record.stats_api = Some(StatsApiStats {
            recent_games: vec![
                RecentGame {
                    passing_yards: Some(200.0),
                    rushing_yards: Some(10.0),
                    ..RecentGame::default()
                },
                RecentGame {
                    passing_yards: Some(150.0),
                    rushing_yards: Some(5.0),
                    ..RecentGame::default()
                },
            ],
            ..StatsApiStats::default()
        });

        let report = assemble(&record, 300.0, Sport::Football).unwrap();
        assert_eq!(report.avg_performance, 182.5);
        assert_eq!(report.recommendation, Recommendation::Under);
        // points-only confidence series: 50 - 10
        assert_eq!(report.confidence_score, 40.0);
    }

    #[test]
    fn empty_sources_are_no_data() {
        let mut record = PlayerRecord::new("Ghost", Sport::Basketball);
        record.stats_api = Some(StatsApiStats::default());
        let err = assemble(&record, 10.0, Sport::Basketball).unwrap_err();
        assert_eq!(err.to_string(), "Could not fetch data for Ghost");
    }
}
