//! Terminal dashboard: input sidebar, metric cards, context panels, a
//! recent-points chart against the betting line and the game log.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{AnalysisReport, AnalysisResult, Sport};

pub mod ui;

pub const LINE_MIN: f64 = 0.0;
pub const LINE_MAX: f64 = 200.0;
pub const LINE_STEP: f64 = 0.5;
pub const DEFAULT_LINE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sport,
    Player,
    Line,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Sport => Focus::Player,
            Focus::Player => Focus::Line,
            Focus::Line => Focus::Sport,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Sport => Focus::Line,
            Focus::Player => Focus::Sport,
            Focus::Line => Focus::Player,
        }
    }
}

/// What the event loop should run after a key press.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub player_name: String,
    pub betting_line: f64,
    pub sport: Sport,
}

/// A finished analysis together with the inputs it ran with.
#[derive(Debug, Clone)]
pub struct Completed {
    pub request: AnalysisRequest,
    pub result: AnalysisResult,
    pub completed_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

pub fn confidence_band(confidence: f64) -> ConfidenceBand {
    if confidence >= 70.0 {
        ConfidenceBand::High
    } else if confidence >= 40.0 {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::Low
    }
}

/// `(game index, points)` for every game in the window that has points.
pub fn points_series(report: &AnalysisReport) -> Vec<(f64, f64)> {
    report
        .recent_games
        .iter()
        .enumerate()
        .filter_map(|(i, g)| g.points.map(|p| (i as f64, p)))
        .collect()
}

pub struct DashboardState {
    pub sport: Sport,
    pub player_name: String,
    pub betting_line: f64,
    pub focus: Focus,
    pub pending: Option<AnalysisRequest>,
    pub last: Option<Completed>,
    pub should_quit: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            sport: Sport::Basketball,
            player_name: String::new(),
            betting_line: DEFAULT_LINE,
            focus: Focus::Player,
            pending: None,
            last: None,
            should_quit: false,
        }
    }

    pub fn adjust_line(&mut self, steps: f64) {
        self.betting_line = (self.betting_line + steps * LINE_STEP).clamp(LINE_MIN, LINE_MAX);
    }

    /// Apply a key press. Returns a request when an analysis should start.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<AnalysisRequest> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => return self.start_analysis(),
            code => match self.focus {
                Focus::Player => match code {
                    KeyCode::Char(c) => self.player_name.push(c),
                    KeyCode::Backspace => {
                        self.player_name.pop();
                    }
                    _ => {}
                },
                Focus::Sport => match code {
                    KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => self.sport = self.sport.toggle(),
                    KeyCode::Char('q') => self.should_quit = true,
                    _ => {}
                },
                Focus::Line => match code {
                    KeyCode::Left | KeyCode::Char('-') => self.adjust_line(-1.0),
                    KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_line(1.0),
                    KeyCode::Char('q') => self.should_quit = true,
                    _ => {}
                },
            },
        }
        None
    }

    fn start_analysis(&mut self) -> Option<AnalysisRequest> {
        if self.pending.is_some() || self.player_name.trim().is_empty() {
            return None;
        }
        let request = AnalysisRequest {
            player_name: self.player_name.clone(),
            betting_line: self.betting_line,
            sport: self.sport,
        };
        self.pending = Some(request.clone());
        Some(request)
    }

    pub fn finish(&mut self, request: AnalysisRequest, result: AnalysisResult) {
        self.pending = None;
        self.last = Some(Completed {
            request,
            result,
            completed_at: Local::now(),
        });
    }
}
