//! HTTP service binary.

use std::sync::Arc;

use anyhow::Result;
use prop_analyzer::server::{self, AppState};
use prop_analyzer::{logging, Config, PropAnalyzer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    logging::init(logging::DEFAULT_DIRECTIVE)?;

    info!("Prop Analyzer service v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    if config.odds_api_key.is_none() {
        warn!("PRIZEPICKS_API_KEY not set; odds data will be unavailable");
    }

    let analyzer = Arc::new(PropAnalyzer::from_config(&config)?);
    server::serve(&config.bind_addr(), AppState::new(Arc::clone(&analyzer))).await?;

    // the router (and its clone of the analyzer) is gone once serve returns
    match Arc::try_unwrap(analyzer) {
        Ok(analyzer) => analyzer.close().await,
        Err(_) => warn!("Analyzer still referenced at shutdown; skipping close"),
    }

    Ok(())
}
