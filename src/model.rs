//! Data shapes shared by the collectors, the scoring pipeline and the
//! presentation layers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Sport selects which stat fields and which collector routes apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Basketball,
    Football,
}

impl Sport {
    pub const ALL: [Sport; 2] = [Sport::Basketball, Sport::Football];

    pub fn as_str(self) -> &'static str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Football => "football",
        }
    }

    /// League code used in media-site URLs.
    pub fn league_code(self) -> &'static str {
        match self {
            Sport::Basketball => "nba",
            Sport::Football => "nfl",
        }
    }

    pub fn toggle(self) -> Sport {
        match self {
            Sport::Basketball => Sport::Football,
            Sport::Football => Sport::Basketball,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basketball" => Ok(Sport::Basketball),
            "football" => Ok(Sport::Football),
            other => Err(format!("unsupported sport '{other}' (expected basketball or football)")),
        }
    }
}

/// One game line from any source. Shape varies by sport and source, so every
/// stat is optional and absent stats are omitted when serialized.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RecentGame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebounds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assists: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passing_yards: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rushing_yards: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touchdowns: Option<f64>,
}

impl RecentGame {
    pub fn basketball(date: impl Into<String>, points: f64, rebounds: f64, assists: f64) -> Self {
        Self {
            date: Some(date.into()),
            points: Some(points),
            rebounds: Some(rebounds),
            assists: Some(assists),
            ..Self::default()
        }
    }

    pub fn football(date: impl Into<String>, passing_yards: f64, rushing_yards: f64, touchdowns: f64) -> Self {
        Self {
            date: Some(date.into()),
            passing_yards: Some(passing_yards),
            rushing_yards: Some(rushing_yards),
            touchdowns: Some(touchdowns),
            ..Self::default()
        }
    }
}

/// Media-site scrape result.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MediaSiteStats {
    pub recent_games: Vec<RecentGame>,
    pub avg_points: Option<f64>,
    pub avg_rebounds: Option<f64>,
    pub avg_assists: Option<f64>,
}

/// Stats-API player profile. Every field is optional on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StatsApiStats {
    pub name: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub recent_games: Vec<RecentGame>,
    pub injury_status: Option<String>,
    pub injury_details: Option<String>,
    pub injury_update_date: Option<String>,
    pub next_opponent: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub opponent_rank: Option<String>,
    pub game_location: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub days_rest: Option<String>,
}

/// Accepts `"7"`, `7` or `null`; providers are inconsistent about rank and rest fields.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// A current betting line for the player.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Projection {
    pub stat_type: String,
    pub line: f64,
    pub timestamp: String,
}

/// Everything gathered for one analysis request.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player_name: String,
    pub sport: Sport,
    pub media_site: Option<MediaSiteStats>,
    pub stats_api: Option<StatsApiStats>,
    pub odds: Option<Vec<Projection>>,
    pub fetched_at: DateTime<Utc>,
}

impl PlayerRecord {
    pub fn new(player_name: impl Into<String>, sport: Sport) -> Self {
        Self {
            player_name: player_name.into(),
            sport,
            media_site: None,
            stats_api: None,
            odds: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn media_games(&self) -> &[RecentGame] {
        self.media_site
            .as_ref()
            .map(|s| s.recent_games.as_slice())
            .unwrap_or(&[])
    }

    pub fn stats_games(&self) -> &[RecentGame] {
        self.stats_api
            .as_ref()
            .map(|s| s.recent_games.as_slice())
            .unwrap_or(&[])
    }

    /// True when at least one stats source contributed a game. Odds do not count.
    pub fn has_stats(&self) -> bool {
        !self.media_games().is_empty() || !self.stats_games().is_empty()
    }
}

/// Over/Under call against the betting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Over,
    Under,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Over => f.write_str("Over"),
            Recommendation::Under => f.write_str("Under"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InjuryStatus {
    pub status: String,
    pub details: String,
    pub last_updated: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchupContext {
    pub opponent: String,
    pub opponent_rank: String,
    pub home_away: String,
    pub rest_days: String,
}

/// Successful analysis payload.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AnalysisReport {
    pub player_name: String,
    pub avg_performance: f64,
    pub betting_line: f64,
    pub performance_diff: f64,
    pub recommendation: Recommendation,
    pub confidence_score: f64,
    pub recent_games: Vec<RecentGame>,
    pub injury_status: InjuryStatus,
    pub matchup_analysis: MatchupContext,
    pub success: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AnalysisFailure {
    pub error: String,
    pub success: bool,
}

/// Response record returned by every entry point.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AnalysisResult {
    Success(AnalysisReport),
    Failure(AnalysisFailure),
}

impl AnalysisResult {
    pub fn failure(error: impl fmt::Display) -> Self {
        AnalysisResult::Failure(AnalysisFailure {
            error: error.to_string(),
            success: false,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisResult::Success(report) => Some(report),
            AnalysisResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisResult::Success(_) => None,
            AnalysisResult::Failure(failure) => Some(&failure.error),
        }
    }

    /// `(key, value)` pairs in response order, for plain-text output.
    /// Nested values are rendered as compact JSON.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            AnalysisResult::Success(r) => vec![
                ("player_name", r.player_name.clone()),
                ("avg_performance", format!("{:?}", r.avg_performance)),
                ("betting_line", format!("{:?}", r.betting_line)),
                ("performance_diff", format!("{:?}", r.performance_diff)),
                ("recommendation", r.recommendation.to_string()),
                ("confidence_score", format!("{:?}", r.confidence_score)),
                ("recent_games", compact_json(&r.recent_games)),
                ("injury_status", compact_json(&r.injury_status)),
                ("matchup_analysis", compact_json(&r.matchup_analysis)),
                ("success", r.success.to_string()),
            ],
            AnalysisResult::Failure(f) => vec![
                ("error", f.error.clone()),
                ("success", f.success.to_string()),
            ],
        }
    }
}

fn compact_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}
