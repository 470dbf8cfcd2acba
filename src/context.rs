//! Injury and matchup context read from the stats-API profile.

use crate::model::{InjuryStatus, MatchupContext, PlayerRecord, StatsApiStats};

const UNKNOWN: &str = "Unknown";

/// Injury view from the stats-API profile, with defaults when absent.
pub fn injury_status(record: &PlayerRecord) -> InjuryStatus {
    let stats = record.stats_api.as_ref();
    let field = |pick: fn(&StatsApiStats) -> Option<&String>, default: &str| {
        stats
            .and_then(pick)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    InjuryStatus {
        status: field(|s| s.injury_status.as_ref(), UNKNOWN),
        details: field(|s| s.injury_details.as_ref(), ""),
        last_updated: field(|s| s.injury_update_date.as_ref(), ""),
    }
}

/// Next-game context from the stats-API profile; every field defaults to "Unknown".
pub fn matchup(record: &PlayerRecord) -> MatchupContext {
    let stats = record.stats_api.as_ref();
    let field = |pick: fn(&StatsApiStats) -> Option<&String>| {
        stats
            .and_then(pick)
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    MatchupContext {
        opponent: field(|s| s.next_opponent.as_ref()),
        opponent_rank: field(|s| s.opponent_rank.as_ref()),
        home_away: field(|s| s.game_location.as_ref()),
        rest_days: field(|s| s.days_rest.as_ref()),
    }
}
