//! Player prop analyzer.
//!
//! Pulls a player's recent games from a sports-media site and a stats API,
//! looks up current projections from a wagering-lines API, averages the
//! sport-relevant stat and compares it to a betting line.

pub mod aggregator;
pub mod analyzer;
pub mod collectors;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod scoring;
pub mod server;

pub use analyzer::PropAnalyzer;
pub use config::Config;
pub use model::{AnalysisResult, Sport};
