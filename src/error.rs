use reqwest::StatusCode;
use thiserror::Error;

/// Failure inside a single collector. Never leaves the collector: it is
/// logged and turned into "no data from this source".
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source_name} returned status {status}: {body}")]
    Status {
        source_name: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{source_name} parse error: {reason}")]
    Parse {
        source_name: &'static str,
        reason: String,
    },
}

/// Failure of a whole analysis; rendered as `{error, success: false}`.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Player name is required")]
    MissingPlayer,

    #[error("Betting line must be a finite number, got {0}")]
    InvalidLine(f64),

    #[error("Could not fetch data for {0}")]
    NoData(String),

    #[error("Collector task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type AnalyzeResult<T> = std::result::Result<T, AnalyzeError>;
