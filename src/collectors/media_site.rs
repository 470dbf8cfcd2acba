//! Sports-media site scraper (HTML player pages).

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::{read_success_body, SourceCollector};
use crate::error::CollectorError;
use crate::model::{MediaSiteStats, RecentGame, Sport};

const SOURCE: &str = "media-site";

/// Rows kept from the game-log table, after the header row.
const MAX_ROWS: usize = 5;

pub struct MediaSiteScraper {
    client: reqwest::Client,
    base_url: String,
}

impl MediaSiteScraper {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn player_url(&self, player_name: &str, sport: Sport) -> String {
        format!(
            "{}/{}/players/{}",
            self.base_url,
            sport.league_code(),
            player_slug(player_name)
        )
    }
}

/// "LeBron James" -> "lebron-james"
pub fn player_slug(player_name: &str) -> String {
    player_name.replace(' ', "-").to_lowercase()
}

#[async_trait]
impl SourceCollector for MediaSiteScraper {
    type Output = MediaSiteStats;

    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch(&self, player_name: &str, sport: Sport) -> Result<Option<MediaSiteStats>, CollectorError> {
        let url = self.player_url(player_name, sport);
        debug!("Fetching media-site page {}", url);

        let response = self.client.get(&url).send().await?;
        let Some(html) = read_success_body(SOURCE, response).await? else {
            return Ok(None);
        };

        let stats = parse_player_page(&html, sport)?;
        info!("Parsed {} games from media site for {}", stats.recent_games.len(), player_name);
        Ok(Some(stats))
    }
}

fn selector(css: &str) -> Result<Selector, CollectorError> {
    Selector::parse(css).map_err(|e| CollectorError::Parse {
        source_name: SOURCE,
        reason: format!("invalid selector '{css}': {e}"),
    })
}

/// Extract the recent-games table from a player page.
///
/// Only basketball pages carry a game log we understand; other sports yield
/// an empty record. A row with fewer than five cells is skipped, but a cell
/// that should be numeric and is not fails the whole page.
pub fn parse_player_page(html: &str, sport: Sport) -> Result<MediaSiteStats, CollectorError> {
    let mut stats = MediaSiteStats::default();
    if sport != Sport::Basketball {
        return Ok(stats);
    }

    let document = Html::parse_document(html);
    let table_selector = selector("div.player-stats")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let Some(table) = document.select(&table_selector).next() else {
        return Ok(stats);
    };

    for row in table.select(&row_selector).skip(1).take(MAX_ROWS) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < 5 {
            continue;
        }
        stats.recent_games.push(RecentGame {
            date: Some(cell_text(&cells[0])),
            points: Some(numeric_cell(&cells[2], "points")?),
            rebounds: Some(numeric_cell(&cells[3], "rebounds")?),
            assists: Some(numeric_cell(&cells[4], "assists")?),
            ..RecentGame::default()
        });
    }

    if !stats.recent_games.is_empty() {
        let n = stats.recent_games.len() as f64;
        let total = |pick: fn(&RecentGame) -> Option<f64>| {
            stats.recent_games.iter().filter_map(pick).sum::<f64>() / n
        };
        stats.avg_points = Some(total(|g| g.points));
        stats.avg_rebounds = Some(total(|g| g.rebounds));
        stats.avg_assists = Some(total(|g| g.assists));
    }

    Ok(stats)
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn numeric_cell(cell: &ElementRef, field: &str) -> Result<f64, CollectorError> {
    let text = cell_text(cell);
    text.parse::<f64>().map_err(|_| CollectorError::Parse {
        source_name: SOURCE,
        reason: format!("{field} cell '{text}' is not a number"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
            <div class="player-stats"><table>
              <tr><th>Date</th><th>Opp</th><th>PTS</th><th>REB</th><th>AST</th></tr>
              {rows}
            </table></div>
            </body></html>"#
        )
    }

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(player_slug("LeBron James"), "lebron-james");
        let scraper = MediaSiteScraper::new(reqwest::Client::new(), "https://example.test/");
        assert_eq!(
            scraper.player_url("Patrick Mahomes", Sport::Football),
            "https://example.test/nfl/players/patrick-mahomes"
        );
    }

    #[test]
    fn parses_game_rows_and_averages() {
        let html = page(
            r#"
            <tr><td>Jan 3</td><td>BOS</td><td>25</td><td>8</td><td>6</td></tr>
            <tr><td>Jan 1</td><td>NYK</td><td>30</td><td>10</td><td>4</td></tr>
            "#,
        );
        let stats = parse_player_page(&html, Sport::Basketball).unwrap();
        assert_eq!(stats.recent_games.len(), 2);
        assert_eq!(stats.recent_games[0].date.as_deref(), Some("Jan 3"));
        assert_eq!(stats.recent_games[1].points, Some(30.0));
        assert_eq!(stats.avg_points, Some(27.5));
        assert_eq!(stats.avg_rebounds, Some(9.0));
        assert_eq!(stats.avg_assists, Some(5.0));
    }

    #[test]
    fn keeps_at_most_five_rows_and_skips_short_rows() {
        let mut rows = String::from("<tr><td>short</td><td>row</td><td>1</td></tr>");
        for day in 1..=7 {
            rows.push_str(&format!(
                "<tr><td>Feb {day}</td><td>X</td><td>{day}</td><td>1</td><td>1</td></tr>"
            ));
        }
        let stats = parse_player_page(&page(&rows), Sport::Basketball).unwrap();
        // the short row occupies one of the five slots
        assert_eq!(stats.recent_games.len(), 4);
        assert_eq!(stats.recent_games[0].points, Some(1.0));
    }

    #[test]
    fn non_numeric_cell_fails_the_page() {
        let html = page("<tr><td>Jan 3</td><td>BOS</td><td>DNP</td><td>0</td><td>0</td></tr>");
        assert!(parse_player_page(&html, Sport::Basketball).is_err());
    }

    #[test]
    fn missing_table_or_football_is_empty() {
        let empty = parse_player_page("<html><body>nothing</body></html>", Sport::Basketball).unwrap();
        assert!(empty.recent_games.is_empty());
        assert_eq!(empty.avg_points, None);

        let football = parse_player_page(&page(""), Sport::Football).unwrap();
        assert_eq!(football, MediaSiteStats::default());
    }
}
