use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::engine::{CredibilityReport, EvaluateOptions, Evaluator};
use crate::error::{EvaluateError, InputError};
use crate::input;

pub const SERVICE_NAME: &str = "Credibility Assistant API";

#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<Evaluator>,
}

impl AppState {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let mut features = vec!["text-analysis", "date-detection", "fact-check-links"];
    if state.evaluator.fact_check_service() != "disabled" {
        features.push("fact-check-lookup");
    }
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "features": features,
    }))
}

#[derive(Debug, Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    skip_fact_check: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Handler-level failures, all reported as 400 with a JSON body.
#[derive(Debug)]
pub enum ApiError {
    Input(InputError),
    Evaluate(EvaluateError),
}

impl From<InputError> for ApiError {
    fn from(e: InputError) -> Self {
        ApiError::Input(e)
    }
}

impl From<EvaluateError> for ApiError {
    fn from(e: EvaluateError) -> Self {
        ApiError::Evaluate(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::Input(e) => ErrorBody {
                error: e.code(),
                message: e.to_string(),
            },
            ApiError::Evaluate(e) => ErrorBody {
                error: "invalid_input",
                message: e.to_string(),
            },
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<CredibilityReport>, ApiError> {
    let raw = body.text.unwrap_or_default();
    let text = input::validate(&raw).inspect_err(|e| {
        warn!(target: "api", code = e.code(), "rejected submission");
    })?;

    let opts = EvaluateOptions {
        published_date_hint: body.published_date,
        skip_fact_check: body.skip_fact_check.unwrap_or(false),
        as_of: None,
    };
    let report = state.evaluator.evaluate(text, opts).await?;
    Ok(Json(report))
}
