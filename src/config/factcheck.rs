// src/config/factcheck.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const DEFAULT_FACTCHECK_CONFIG_PATH: &str = "config/factcheck.json";
pub const ENV_FACTCHECK_API_KEY: &str = "GOOGLE_FACTCHECK_API_KEY";

fn default_enabled() -> bool {
    true
}
fn default_api_key() -> String {
    "ENV".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_page_size() -> u32 {
    5
}
fn default_max_queries() -> usize {
    3
}
fn default_query_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// "ENV" means: read from GOOGLE_FACTCHECK_API_KEY.
    /// Empty after resolution means no key (queries are skipped).
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Results requested per query.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Upper bound on sequential queries per submission.
    #[serde(default = "default_max_queries")]
    pub max_queries: usize,
    /// Per-query timeout; a timed-out query counts as failed.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: default_api_key(),
            language: default_language(),
            page_size: default_page_size(),
            max_queries: default_max_queries(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

impl FactCheckConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: FactCheckConfig = serde_json::from_str(&data)?;
        Ok(cfg.sanitized())
    }

    /// Read `config/factcheck.json` if present, else defaults. Always resolves the key.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = Path::new(DEFAULT_FACTCHECK_CONFIG_PATH);
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default().sanitized())
        }
    }

    /// Resolved API key, or `None` when absent.
    pub fn api_key(&self) -> Option<&str> {
        let k = self.api_key.trim();
        if k.is_empty() {
            None
        } else {
            Some(k)
        }
    }

    fn sanitized(mut self) -> Self {
        // Resolve api key if "ENV"; a missing env var is not an error here,
        // the correlator simply skips every query.
        if self.api_key.trim().eq_ignore_ascii_case("env") {
            self.api_key = env::var(ENV_FACTCHECK_API_KEY).unwrap_or_default();
        }
        self.language = self.language.trim().to_lowercase();
        if self.language.is_empty() {
            self.language = default_language();
        }
        if self.page_size == 0 {
            self.page_size = default_page_size();
        }
        if self.query_timeout_ms == 0 {
            self.query_timeout_ms = default_query_timeout_ms();
        }
        self
    }
}
