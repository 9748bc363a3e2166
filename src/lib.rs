// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod factcheck;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod prompts;
pub mod rules;
pub mod signal;
pub mod temporal;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use once_cell::sync::OnceCell;
use tracing::info;

pub use crate::api::router;
pub use crate::config::{FactCheckConfig, ReferenceLists};
pub use crate::engine::{CredibilityReport, EvaluateOptions, Evaluator, Status};
pub use crate::error::{EvaluateError, FactCheckError, InputError};
pub use crate::signal::{Reason, ReasonType, SignalResult};

// The Prometheus recorder is process-global; install it once.
static METRICS: OnceCell<metrics::Metrics> = OnceCell::new();

/// Build the evaluator from on-disk configuration (or built-in defaults).
pub fn build_evaluator() -> anyhow::Result<Evaluator> {
    let lists = ReferenceLists::load_default().context("loading reference lists")?;
    let fc_cfg = FactCheckConfig::load_default().context("loading fact-check config")?;
    let service = factcheck::build_client_from_config(&fc_cfg);
    info!(
        target: "startup",
        trusted = lists.trusted_domains.len(),
        fact_check = service.name(),
        fact_check_ready = service.is_available(),
        "evaluator configured"
    );
    let correlator = factcheck::FactCheckCorrelator::new(service, &fc_cfg);
    Ok(Evaluator::new(Arc::new(lists), correlator))
}

/// Full in-process app: API routes plus `/metrics`.
pub async fn app() -> anyhow::Result<Router> {
    let evaluator = build_evaluator()?;
    let metrics = METRICS.get_or_try_init(metrics::Metrics::init)?;
    Ok(api::router(api::AppState::new(evaluator)).merge(metrics.router()))
}
