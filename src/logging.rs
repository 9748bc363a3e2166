// src/logging.rs
//! Dev-only tracing setup and anonymized identifiers for log lines.
//! Submitted text is never logged; only a short SHA-256 prefix of it.

use std::env;

pub const ENV_DEV_LOG: &str = "CREDIBILITY_DEV_LOG";

/// CREDIBILITY_DEV_LOG=1 AND a dev environment (debug build or
/// SHUTTLE_ENV in {local, development, dev}).
pub fn dev_logging_enabled() -> bool {
    if env::var(ENV_DEV_LOG).ok().as_deref() != Some("1") {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// First 6 bytes of the SHA-256 digest, hex encoded.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    use std::fmt::Write as _;

    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Install a compact fmt subscriber when dev logging is on. Safe to call twice.
pub fn init_dev_tracing() {
    if !dev_logging_enabled() {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}
