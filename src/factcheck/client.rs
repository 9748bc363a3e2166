//! Fact-check service abstraction and the Google Fact Check Tools client.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{FactCheckClaim, FactCheckReview};
use crate::config::FactCheckConfig;
use crate::error::FactCheckError;

pub const FACTCHECK_API_BASE: &str = "https://factchecktools.googleapis.com/v1alpha1/claims:search";
pub const ENV_FACTCHECK_BASE_URL: &str = "GOOGLE_FACTCHECK_BASE_URL";

/// A searchable store of published fact-checks.
#[async_trait]
pub trait FactCheckService: Send + Sync {
    async fn search(
        &self,
        query: &str,
        language: &str,
        page_size: u32,
    ) -> Result<Vec<FactCheckClaim>, FactCheckError>;

    /// Provider name for logs and the report breakdown.
    fn name(&self) -> &'static str;

    /// False when the service cannot possibly answer (no key, disabled).
    fn is_available(&self) -> bool {
        true
    }
}

pub type DynFactCheck = Arc<dyn FactCheckService>;

/// Never queries anything.
pub struct DisabledFactCheck;

#[async_trait]
impl FactCheckService for DisabledFactCheck {
    async fn search(&self, _: &str, _: &str, _: u32) -> Result<Vec<FactCheckClaim>, FactCheckError> {
        Err(FactCheckError::MissingApiKey)
    }
    fn name(&self) -> &'static str {
        "disabled"
    }
    fn is_available(&self) -> bool {
        false
    }
}

/// Google Fact Check Tools `claims:search`.
pub struct GoogleFactCheckClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

// Response models; only the fields we read.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    claims: Vec<ApiClaim>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiClaim {
    text: Option<String>,
    claimant: Option<String>,
    claim_date: Option<String>,
    #[serde(default)]
    claim_review: Vec<ApiReview>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiReview {
    publisher: Option<ApiPublisher>,
    url: Option<String>,
    title: Option<String>,
    textual_rating: Option<String>,
    review_rating: Option<ApiReviewRating>,
    review_date: Option<String>,
    language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPublisher {
    name: Option<String>,
    site: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiReviewRating {
    rating_value: Option<serde_json::Value>,
}

impl From<ApiClaim> for FactCheckClaim {
    fn from(c: ApiClaim) -> Self {
        FactCheckClaim {
            text: c.text,
            claimant: c.claimant,
            claim_date: c.claim_date,
            reviews: c.claim_review.into_iter().map(FactCheckReview::from).collect(),
        }
    }
}

impl From<ApiReview> for FactCheckReview {
    fn from(r: ApiReview) -> Self {
        let (publisher, publisher_site) = match r.publisher {
            Some(p) => (p.name, p.site),
            None => (None, None),
        };
        let rating_value = r
            .review_rating
            .and_then(|rr| rr.rating_value)
            .and_then(|v| match v {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
        FactCheckReview {
            publisher,
            publisher_site,
            url: r.url,
            title: r.title,
            rating: r.textual_rating,
            rating_value,
            review_date: r.review_date,
            language_code: r.language_code,
        }
    }
}

impl GoogleFactCheckClient {
    /// Base URL comes from `GOOGLE_FACTCHECK_BASE_URL`, else the public endpoint.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, FactCheckError> {
        let base_url =
            env::var(ENV_FACTCHECK_BASE_URL).unwrap_or_else(|_| FACTCHECK_API_BASE.to_string());
        Self::with_base_url(api_key, base_url, timeout)
    }

    pub fn with_base_url(
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FactCheckError> {
        let http = Client::builder()
            .user_agent(concat!("credibility-assistant/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .map_err(|e| FactCheckError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn request_url(&self, query: &str, key: &str, language: &str, page_size: u32) -> Result<Url, FactCheckError> {
        let page_size = page_size.to_string();
        Url::parse_with_params(
            &self.base_url,
            &[
                ("query", query),
                ("key", key),
                ("pageSize", page_size.as_str()),
                ("languageCode", language),
            ],
        )
        .map_err(|e| FactCheckError::Network(format!("invalid base url: {e}")))
    }
}

#[async_trait]
impl FactCheckService for GoogleFactCheckClient {
    async fn search(
        &self,
        query: &str,
        language: &str,
        page_size: u32,
    ) -> Result<Vec<FactCheckClaim>, FactCheckError> {
        let key = self.api_key.as_deref().ok_or(FactCheckError::MissingApiKey)?;
        let url = self.request_url(query, key, language, page_size)?;

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FactCheckError::Timeout
                } else {
                    FactCheckError::Network(e.without_url().to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FactCheckError::Http(status.as_u16()));
        }

        let body: SearchResponse = resp
            .json()
            .await
            .map_err(|e| FactCheckError::Malformed(e.without_url().to_string()))?;

        Ok(body.claims.into_iter().map(FactCheckClaim::from).collect())
    }

    fn name(&self) -> &'static str {
        "google"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Factory: disabled config or an unbuildable HTTP client yields `DisabledFactCheck`.
pub fn build_client_from_config(cfg: &FactCheckConfig) -> DynFactCheck {
    if !cfg.enabled {
        return Arc::new(DisabledFactCheck);
    }
    let timeout = Duration::from_millis(cfg.query_timeout_ms);
    match GoogleFactCheckClient::new(cfg.api_key().map(str::to_string), timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::warn!(target: "factcheck", error = %e, "fact-check client unavailable");
            Arc::new(DisabledFactCheck)
        }
    }
}
