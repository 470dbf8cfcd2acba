use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Wrap};

use super::{confidence_band, points_series, Completed, ConfidenceBand, DashboardState, Focus};
use crate::model::{AnalysisReport, AnalysisResult, Recommendation, Sport};

pub fn draw(frame: &mut Frame, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(frame.size());

    let title = Paragraph::new(" PROP ANALYZER").style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(1)])
        .split(rows[1]);

    render_sidebar(frame, columns[0], state);
    render_main(frame, columns[1], state);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, rows[2]);
}

fn footer_text(state: &DashboardState) -> String {
    let keys = "Tab/↑/↓ Focus | ←/→ Change | Enter Analyze | Esc Quit";
    match &state.last {
        Some(done) => format!(
            "{keys} | Data last updated: {}",
            done.completed_at.format("%Y-%m-%d %H:%M:%S")
        ),
        None => keys.to_string(),
    }
}

fn field_style(state: &DashboardState, focus: Focus) -> Style {
    if state.focus == focus {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let cursor = if state.focus == Focus::Player { "_" } else { "" };
    let lines = vec![
        Line::styled("Select Sport", field_style(state, Focus::Sport)),
        Line::raw(format!("  < {} >", state.sport)),
        Line::raw(""),
        Line::styled("Player Name", field_style(state, Focus::Player)),
        Line::raw(format!("  {}{}", state.player_name, cursor)),
        Line::raw(""),
        Line::styled("Betting Line", field_style(state, Focus::Line)),
        Line::raw(format!("  {:.1}  (0.0-200.0, step 0.5)", state.betting_line)),
        Line::raw(""),
        match &state.pending {
            Some(request) => Line::styled(
                format!("Analyzing {}...", request.player_name),
                Style::default().fg(Color::Cyan),
            ),
            None => Line::raw("Enter: Analyze Player"),
        },
    ];

    let sidebar = Paragraph::new(lines)
        .block(Block::default().title("Analysis Parameters").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(sidebar, area);
}

fn render_main(frame: &mut Frame, area: Rect, state: &DashboardState) {
    match &state.last {
        None => render_welcome(frame, area),
        Some(Completed {
            result: AnalysisResult::Failure(failure),
            ..
        }) => {
            let error = Paragraph::new(format!("Error: {}", failure.error))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title("Analysis").borders(Borders::ALL))
                .wrap(Wrap { trim: true });
            frame.render_widget(error, area);
        }
        Some(Completed {
            request,
            result: AnalysisResult::Success(report),
            ..
        }) => render_report(frame, area, report, request.sport),
    }
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let text = [
        "Enter player details in the sidebar to start analysis.",
        "",
        "1. Select the sport (basketball or football)",
        "2. Enter the player's name as it appears on the lines board",
        "3. Set the betting line",
        "4. Press Enter to analyze",
        "",
        "You get the recent average against the line, a confidence score,",
        "injury and matchup context, and the recent game log.",
    ]
    .join("\n");
    let welcome = Paragraph::new(text).block(Block::default().title("How to use").borders(Borders::ALL));
    frame.render_widget(welcome, area);
}

fn render_report(frame: &mut Frame, area: Rect, report: &AnalysisReport, sport: Sport) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Length(8),
        ])
        .split(area);

    render_cards(frame, sections[0], report);
    render_context(frame, sections[1], report);
    render_chart(frame, sections[2], report);
    render_game_log(frame, sections[3], report, sport);
}

fn render_cards(frame: &mut Frame, area: Rect, report: &AnalysisReport) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(area);

    let avg = Paragraph::new(vec![
        Line::styled(format!("{:.2}", report.avg_performance), Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(format!("{:+.2} vs Line", report.performance_diff)),
    ])
    .block(Block::default().title("Average Performance").borders(Borders::ALL));
    frame.render_widget(avg, cards[0]);

    let confidence_color = match confidence_band(report.confidence_score) {
        ConfidenceBand::High => Color::Green,
        ConfidenceBand::Medium => Color::Yellow,
        ConfidenceBand::Low => Color::Red,
    };
    let confidence = Paragraph::new(format!("{:.1}%", report.confidence_score))
        .style(Style::default().fg(confidence_color).add_modifier(Modifier::BOLD))
        .block(Block::default().title("Confidence Score").borders(Borders::ALL));
    frame.render_widget(confidence, cards[1]);

    let call_color = match report.recommendation {
        Recommendation::Over => Color::Green,
        Recommendation::Under => Color::Red,
    };
    let call = Paragraph::new(report.recommendation.to_string())
        .style(Style::default().fg(call_color).add_modifier(Modifier::BOLD))
        .block(Block::default().title("Recommendation").borders(Borders::ALL));
    frame.render_widget(call, cards[2]);
}

fn render_context(frame: &mut Frame, area: Rect, report: &AnalysisReport) {
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let injury = &report.injury_status;
    let injury_text = format!(
        "Status: {}\nDetails: {}\nLast Updated: {}",
        injury.status, injury.details, injury.last_updated
    );
    frame.render_widget(
        Paragraph::new(injury_text)
            .block(Block::default().title("Injury Status").borders(Borders::ALL))
            .wrap(Wrap { trim: true }),
        panels[0],
    );

    let matchup = &report.matchup_analysis;
    let matchup_text = format!(
        "Opponent: {}\nOpponent Rank: {}\nLocation: {}\nRest Days: {}",
        matchup.opponent, matchup.opponent_rank, matchup.home_away, matchup.rest_days
    );
    frame.render_widget(
        Paragraph::new(matchup_text)
            .block(Block::default().title("Matchup Analysis").borders(Borders::ALL))
            .wrap(Wrap { trim: true }),
        panels[1],
    );
}

fn render_chart(frame: &mut Frame, area: Rect, report: &AnalysisReport) {
    let block = Block::default().title("Recent Game Performance").borders(Borders::ALL);
    let points = points_series(report);
    if points.is_empty() {
        frame.render_widget(Paragraph::new("No points recorded for these games").block(block), area);
        return;
    }

    let x_max = (report.recent_games.len().saturating_sub(1)).max(1) as f64;
    let threshold = [(0.0, report.betting_line), (x_max, report.betting_line)];
    let y_max = points
        .iter()
        .map(|(_, y)| *y)
        .fold(report.betting_line, f64::max)
        .max(1.0)
        * 1.1;

    let datasets = vec![
        Dataset::default()
            .name("points")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .name("betting line")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&threshold),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("game")
                .bounds([0.0, x_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{x_max:.0}"))]),
        )
        .y_axis(
            Axis::default()
                .title("points")
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{y_max:.0}"))]),
        );
    frame.render_widget(chart, area);
}

fn stat(value: Option<f64>) -> String {
    value.map(|v| format!("{v}")).unwrap_or_else(|| "-".to_string())
}

fn render_game_log(frame: &mut Frame, area: Rect, report: &AnalysisReport, sport: Sport) {
    let (header, widths): (Vec<&str>, Vec<Constraint>) = match sport {
        Sport::Basketball => (
            vec!["Date", "PTS", "REB", "AST", "MIN"],
            vec![Constraint::Length(14), Constraint::Length(6), Constraint::Length(6), Constraint::Length(6), Constraint::Length(6)],
        ),
        Sport::Football => (
            vec!["Date", "PASS", "RUSH", "TD"],
            vec![Constraint::Length(14), Constraint::Length(7), Constraint::Length(7), Constraint::Length(4)],
        ),
    };

    let rows: Vec<Row> = report
        .recent_games
        .iter()
        .map(|g| {
            let date = g.date.clone().unwrap_or_else(|| "-".to_string());
            let cells = match sport {
                Sport::Basketball => vec![date, stat(g.points), stat(g.rebounds), stat(g.assists), stat(g.minutes)],
                Sport::Football => vec![date, stat(g.passing_yards), stat(g.rushing_yards), stat(g.touchdowns)],
            };
            Row::new(cells.into_iter().map(Cell::from))
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().title("Detailed Game Log").borders(Borders::ALL));
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::AnalysisRequest;
    use crate::model::{InjuryStatus, MatchupContext, RecentGame};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_welcome_then_report() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut state = DashboardState::new();

        terminal.draw(|f| draw(f, &state)).unwrap();
        assert!(buffer_text(&terminal).contains("How to use"));

        let request = AnalysisRequest {
            player_name: "Test Player".into(),
            betting_line: 24.0,
            sport: Sport::Basketball,
        };
        let report = AnalysisReport {
            player_name: "Test Player".into(),
            avg_performance: 25.0,
            betting_line: 24.0,
            performance_diff: 1.0,
            recommendation: Recommendation::Over,
            confidence_score: 72.5,
            recent_games: vec![
                RecentGame::basketball("Jan 3", 25.0, 8.0, 6.0),
                RecentGame::basketball("Jan 1", 30.0, 10.0, 4.0),
            ],
            injury_status: InjuryStatus {
                status: "Active".into(),
                details: String::new(),
                last_updated: String::new(),
            },
            matchup_analysis: MatchupContext {
                opponent: "BOS".into(),
                opponent_rank: "2".into(),
                home_away: "Home".into(),
                rest_days: "1".into(),
            },
            success: true,
        };
        state.finish(request, AnalysisResult::Success(report));

        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Confidence Score"));
        assert!(text.contains("72.5%"));
        assert!(text.contains("Over"));
        assert!(text.contains("BOS"));
        assert!(text.contains("Detailed Game Log"));
    }

    #[test]
    fn renders_failure_message() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut state = DashboardState::new();
        let request = AnalysisRequest {
            player_name: "Ghost".into(),
            betting_line: 10.0,
            sport: Sport::Football,
        };
        state.finish(request, AnalysisResult::failure("Could not fetch data for Ghost"));
        terminal.draw(|f| draw(f, &state)).unwrap();
        assert!(buffer_text(&terminal).contains("Could not fetch data for Ghost"));
    }
}
