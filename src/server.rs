//! HTTP front end: `POST /analyze`, `GET /health` and a small form page.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::analyzer::PropAnalyzer;
use crate::model::{AnalysisResult, Sport};

const INDEX_HTML: &str = include_str!("../static/index.html");
const SCRIPT_JS: &str = include_str!("../static/script.js");

/// Service health state
#[derive(Clone)]
pub struct HealthState {
    pub last_analysis_time: Arc<RwLock<Option<DateTime<Utc>>>>,
    pub analysis_count: Arc<RwLock<usize>>,
    pub failure_count: Arc<RwLock<usize>>,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            last_analysis_time: Arc::new(RwLock::new(None)),
            analysis_count: Arc::new(RwLock::new(0)),
            failure_count: Arc::new(RwLock::new(0)),
        }
    }

    pub async fn record(&self, result: &AnalysisResult) {
        *self.last_analysis_time.write().await = Some(Utc::now());
        *self.analysis_count.write().await += 1;
        if result.is_success() {
            *self.failure_count.write().await = 0;
        } else {
            *self.failure_count.write().await += 1;
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<PropAnalyzer>,
    pub health: HealthState,
}

impl AppState {
    pub fn new(analyzer: Arc<PropAnalyzer>) -> Self {
        Self {
            analyzer,
            health: HealthState::new(),
        }
    }
}

/// Body of `POST /analyze`. Every field is optional on the wire.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub sport: Option<String>,
    pub player: Option<String>,
    pub line: Option<Value>,
}

/// Absent or null means 0; numbers and numeric strings are accepted.
pub fn parse_line(line: Option<&Value>) -> Result<f64, String> {
    match line {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| format!("line {n} is not representable as a float")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("could not convert string to float: '{s}'")),
        Some(other) => Err(format!("line must be a number, got {other}")),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(AnalysisResult::failure(message))).into_response()
}

async fn analyze_handler(
    State(state): State<AppState>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    let sport = match request.sport.as_deref().map(str::parse::<Sport>) {
        Some(Ok(sport)) => sport,
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, e),
        None => return error_response(StatusCode::BAD_REQUEST, "sport is required".to_string()),
    };

    let line = match parse_line(request.line.as_ref()) {
        Ok(line) => line,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    };

    let player = request.player.unwrap_or_default();
    let result = state.analyzer.analyze(&player, line, sport).await;
    state.health.record(&result).await;

    (StatusCode::OK, Json(result)).into_response()
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let health = &state.health;
    let last_analysis = health.last_analysis_time.read().await;
    let analyses = health.analysis_count.read().await;
    let failures = health.failure_count.read().await;

    let status = if *failures > 5 { "degraded" } else { "ok" };

    let http_status = if *failures > 10 {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        http_status,
        Json(json!({
            "service": "prop-analyzer",
            "version": env!("CARGO_PKG_VERSION"),
            "status": status,
            "last_analysis": last_analysis.map(|t| t.to_rfc3339()),
            "analyses": *analyses,
            "consecutive_failures": *failures
        })),
    )
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn script_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], SCRIPT_JS)
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/static/script.js", get(script_handler))
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(cors)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(bind_addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down...");
        })
        .await
        .context("HTTP server error")
}
