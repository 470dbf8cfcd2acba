//! Interactive terminal dashboard.

use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use prop_analyzer::dashboard::{ui, AnalysisRequest, DashboardState};
use prop_analyzer::{logging, AnalysisResult, Config, PropAnalyzer};
use ratatui::prelude::*;
use tokio::runtime::Runtime;

type Outcome = (AnalysisRequest, AnalysisResult);

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let log_path = std::env::var("DASHBOARD_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("prop-analyzer-dashboard.log"));
    logging::init_to_file(logging::DEFAULT_DIRECTIVE, &log_path)?;

    let config = Config::from_env()?;
    let runtime = Runtime::new().context("Failed to start tokio runtime")?;
    let analyzer = Arc::new(PropAnalyzer::from_config(&config)?);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &runtime, &analyzer);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Ok(analyzer) = Arc::try_unwrap(analyzer) {
        runtime.block_on(analyzer.close());
    }

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, runtime: &Runtime, analyzer: &Arc<PropAnalyzer>) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let (tx, rx) = mpsc::channel::<Outcome>();
    let mut state = DashboardState::new();

    loop {
        while let Ok((request, result)) = rx.try_recv() {
            state.finish(request, result);
        }

        terminal.draw(|f| ui::draw(f, &state))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(request) = state.on_key(key) {
                        spawn_analysis(runtime, Arc::clone(analyzer), request, tx.clone());
                    }
                }
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

fn spawn_analysis(runtime: &Runtime, analyzer: Arc<PropAnalyzer>, request: AnalysisRequest, tx: mpsc::Sender<Outcome>) {
    runtime.spawn(async move {
        let result = analyzer
            .analyze(&request.player_name, request.betting_line, request.sport)
            .await;
        // receiver is gone only after the UI has quit
        let _ = tx.send((request, result));
    });
}
