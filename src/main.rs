//! Credibility Assistant: binary entrypoint.
//! Boots the Axum HTTP server on Shuttle with configs loaded from `config/`.

use credibility_assistant::logging::init_dev_tracing;
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    init_dev_tracing();

    let router = credibility_assistant::app().await?;
    Ok(router.into())
}
