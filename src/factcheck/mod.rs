// src/factcheck/mod.rs
//! Fact-check correlation: extract candidate claims, look them up in an
//! external fact-check service, normalize the reviews and score the verdicts.
//!
//! Lookups are sequential and retryless. Every query ends as a `QueryOutcome`
//! and the outcomes are folded into one harvest, so a failing service only
//! removes evidence; it never fails the evaluation.

pub mod claims;
pub mod client;
pub mod links;

use std::collections::HashSet;
use std::time::Duration;

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FactCheckConfig;
use crate::error::FactCheckError;
use crate::rules::{first_match, otherwise, Rule};
use crate::signal::{Reason, SignalResult};

pub use claims::extract_claims;
pub use client::{
    build_client_from_config, DisabledFactCheck, DynFactCheck, FactCheckService,
    GoogleFactCheckClient,
};
pub use links::{search_links, FactCheckOrg, SearchLink, FACTCHECK_ORGS};

pub const MAX_QUERY_CHARS: usize = 500;
pub const MAX_REVIEWS: usize = 5;
pub const SCORE_DEBUNKED: i32 = -15;
pub const SCORE_VERIFIED: i32 = 10;
const FALLBACK_QUERY_CHARS: usize = 100;

/// A claim as returned by the fact-check service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckClaim {
    pub text: Option<String>,
    pub claimant: Option<String>,
    pub claim_date: Option<String>,
    pub reviews: Vec<FactCheckReview>,
}

/// One published review of a claim. `url` identifies the review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckReview {
    pub publisher: Option<String>,
    pub publisher_site: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub rating: Option<String>,
    pub rating_value: Option<String>,
    pub review_date: Option<String>,
    pub language_code: Option<String>,
}

/// Normalized reading of a free-text rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingVerdict {
    True,
    False,
    Mixed,
    Unverified,
    Other,
}

impl RatingVerdict {
    pub fn color(self) -> &'static str {
        match self {
            RatingVerdict::True => "#22c55e",
            RatingVerdict::False => "#ef4444",
            RatingVerdict::Mixed => "#eab308",
            RatingVerdict::Unverified => "#6b7280",
            RatingVerdict::Other => "#3b82f6",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RatingVerdict::True => "check_circle",
            RatingVerdict::False => "cancel",
            RatingVerdict::Mixed => "warning",
            RatingVerdict::Unverified => "help",
            RatingVerdict::Other => "info",
        }
    }
}

const RATING_TABLE: &[Rule<str, RatingVerdict>] = &[
    Rule {
        name: "true",
        when: |r: &str| r.contains("true") && !r.contains("false") && !r.contains("partly"),
        then: RatingVerdict::True,
    },
    Rule {
        name: "false",
        when: |r: &str| r.contains("false") || r.contains("pants on fire") || r.contains("fake"),
        then: RatingVerdict::False,
    },
    Rule {
        name: "mixed",
        when: |r: &str| {
            r.contains("partly") || r.contains("half") || r.contains("mixed") || r.contains("misleading")
        },
        then: RatingVerdict::Mixed,
    },
    Rule {
        name: "unverified",
        when: |r: &str| r.contains("unproven") || r.contains("unverified") || r.contains("unknown"),
        then: RatingVerdict::Unverified,
    },
    Rule {
        name: "other",
        when: otherwise,
        then: RatingVerdict::Other,
    },
];

pub fn classify_rating(rating: Option<&str>) -> RatingVerdict {
    let lower = rating.unwrap_or_default().to_lowercase();
    first_match(RATING_TABLE, lower.as_str())
        .map(|r| r.then)
        .unwrap_or(RatingVerdict::Other)
}

/// A review flattened together with its claim, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewMatch {
    pub claim: Option<String>,
    pub claimant: Option<String>,
    pub publisher: Option<String>,
    pub publisher_site: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub rating: Option<String>,
    pub rating_value: Option<String>,
    pub verdict: RatingVerdict,
    pub rating_color: &'static str,
    pub rating_icon: &'static str,
    pub review_date: Option<String>,
}

impl ReviewMatch {
    fn new(claim: &FactCheckClaim, review: FactCheckReview) -> Self {
        let verdict = classify_rating(review.rating.as_deref());
        Self {
            claim: claim.text.clone(),
            claimant: claim.claimant.clone(),
            publisher: review.publisher,
            publisher_site: review.publisher_site,
            url: review.url,
            title: review.title,
            rating: review.rating,
            rating_value: review.rating_value,
            verdict,
            rating_color: verdict.color(),
            rating_icon: verdict.icon(),
            review_date: review.review_date,
        }
    }

    fn rating_lower(&self) -> String {
        self.rating.as_deref().unwrap_or_default().to_lowercase()
    }

    fn is_debunk(&self) -> bool {
        let r = self.rating_lower();
        r.contains("false") || r.contains("fake") || r.contains("pants on fire")
    }

    fn is_confirmation(&self) -> bool {
        let r = self.rating_lower();
        r.contains("true") && !r.contains("false")
    }
}

/// Result of one lookup. Failures become `Skipped`; nothing is retried.
#[derive(Debug)]
pub enum QueryOutcome {
    Found(Vec<FactCheckClaim>),
    Skipped(FactCheckError),
}

impl QueryOutcome {
    fn label(&self) -> &'static str {
        match self {
            QueryOutcome::Found(c) if c.is_empty() => "empty",
            QueryOutcome::Found(_) => "found",
            QueryOutcome::Skipped(e) => e.label(),
        }
    }
}

#[derive(Debug, Default)]
struct Harvest {
    matches: Vec<ReviewMatch>,
    attempted: usize,
    failed: usize,
    errors: Vec<String>,
}

impl Harvest {
    fn absorb(mut self, outcome: QueryOutcome) -> Self {
        self.attempted += 1;
        match outcome {
            QueryOutcome::Found(claims) => {
                for mut claim in claims {
                    let reviews = std::mem::take(&mut claim.reviews);
                    self.matches
                        .extend(reviews.into_iter().map(|r| ReviewMatch::new(&claim, r)));
                }
            }
            QueryOutcome::Skipped(e) => {
                self.failed += 1;
                self.errors.push(e.to_string());
            }
        }
        self
    }
}

/// First occurrence of each review URL wins; at most `MAX_REVIEWS`.
fn dedupe_by_url(matches: Vec<ReviewMatch>) -> Vec<ReviewMatch> {
    let mut seen: HashSet<Option<String>> = HashSet::new();
    matches
        .into_iter()
        .filter(|m| seen.insert(m.url.clone()))
        .take(MAX_REVIEWS)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactCheckDetail {
    pub service: &'static str,
    pub has_api_key: bool,
    pub skipped: bool,
    pub queries_searched: Vec<String>,
    pub queries_attempted: usize,
    pub queries_failed: usize,
    pub errors: Vec<String>,
    pub fact_checks: Vec<ReviewMatch>,
    pub search_urls: Vec<SearchLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Debunked,
    Verified,
    Related,
    Nothing,
}

struct Facts {
    any_debunk: bool,
    any_confirmation: bool,
    count: usize,
}

const VERDICT_TABLE: &[Rule<Facts, (Verdict, i32)>] = &[
    Rule {
        name: "debunked",
        when: |f: &Facts| f.any_debunk,
        then: (Verdict::Debunked, SCORE_DEBUNKED),
    },
    Rule {
        name: "verified",
        when: |f: &Facts| f.any_confirmation,
        then: (Verdict::Verified, SCORE_VERIFIED),
    },
    Rule {
        name: "related",
        when: |f: &Facts| f.count > 0,
        then: (Verdict::Related, 0),
    },
    Rule {
        name: "nothing",
        when: otherwise,
        then: (Verdict::Nothing, 0),
    },
];

fn verdict_reason(verdict: Verdict, matches: &[ReviewMatch]) -> Reason {
    let publisher_of = |pred: fn(&ReviewMatch) -> bool| {
        matches
            .iter()
            .find(|m| pred(m))
            .and_then(|m| m.publisher.clone())
            .unwrap_or_else(|| "fact-checkers".to_string())
    };
    match verdict {
        Verdict::Debunked => Reason::negative(
            "Related Claims Previously Debunked",
            format!(
                "Similar claims have been fact-checked and rated as FALSE by {}. Please review the fact-checks below.",
                publisher_of(ReviewMatch::is_debunk)
            ),
        ),
        Verdict::Verified => Reason::positive(
            "Related Claims Verified",
            format!(
                "Similar claims have been independently verified by {}.",
                publisher_of(ReviewMatch::is_confirmation)
            ),
        ),
        Verdict::Related => Reason::info(
            "Related Fact-Checks Found",
            format!(
                "We found {} related fact-check(s). Review them for more context.",
                matches.len()
            ),
        ),
        Verdict::Nothing => Reason::info(
            "No Direct Fact-Checks Found",
            "No existing fact-checks matched this content. Use the links below to search manually.",
        ),
    }
}

/// Prefix of `s` holding at most `max` characters.
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Correlates submitted text with published fact-checks.
pub struct FactCheckCorrelator {
    service: DynFactCheck,
    language: String,
    page_size: u32,
    max_queries: usize,
    query_timeout: Duration,
}

impl FactCheckCorrelator {
    pub fn new(service: DynFactCheck, cfg: &FactCheckConfig) -> Self {
        Self {
            service,
            language: cfg.language.clone(),
            page_size: cfg.page_size,
            max_queries: cfg.max_queries,
            query_timeout: Duration::from_millis(cfg.query_timeout_ms),
        }
    }

    /// Correlator over `service` with default query settings.
    pub fn with_service(service: DynFactCheck) -> Self {
        Self::new(service, &FactCheckConfig::default())
    }

    pub fn service_name(&self) -> &'static str {
        self.service.name()
    }

    fn base_detail(&self, text: &str, claims: Vec<String>, skipped: bool) -> FactCheckDetail {
        let primary = claims
            .first()
            .map(String::as_str)
            .unwrap_or_else(|| truncate_chars(text, FALLBACK_QUERY_CHARS));
        FactCheckDetail {
            service: self.service.name(),
            has_api_key: self.service.is_available(),
            skipped,
            search_urls: search_links(primary),
            queries_searched: claims,
            queries_attempted: 0,
            queries_failed: 0,
            errors: Vec::new(),
            fact_checks: Vec::new(),
        }
    }

    /// Neutral result without any lookup; manual search links are still built.
    pub fn skipped(&self, text: &str) -> SignalResult<FactCheckDetail> {
        SignalResult::new(0, None, self.base_detail(text, extract_claims(text), true))
    }

    async fn query(&self, claim: &str) -> QueryOutcome {
        let q = truncate_chars(claim, MAX_QUERY_CHARS);
        let search = self.service.search(q, &self.language, self.page_size);
        let outcome = match tokio::time::timeout(self.query_timeout, search).await {
            Ok(Ok(claims)) => QueryOutcome::Found(claims),
            Ok(Err(e)) => QueryOutcome::Skipped(e),
            Err(_) => QueryOutcome::Skipped(FactCheckError::Timeout),
        };
        counter!("factcheck_queries_total", "outcome" => outcome.label()).increment(1);
        outcome
    }

    pub async fn correlate(&self, text: &str) -> SignalResult<FactCheckDetail> {
        let mut detail = self.base_detail(text, extract_claims(text), false);

        let mut outcomes = Vec::new();
        if detail.has_api_key {
            for claim in detail.queries_searched.iter().take(self.max_queries) {
                outcomes.push(self.query(claim).await);
            }
        }
        let harvest = outcomes.into_iter().fold(Harvest::default(), Harvest::absorb);
        let matches = dedupe_by_url(harvest.matches);

        debug!(
            target: "factcheck",
            service = self.service.name(),
            claims = detail.queries_searched.len(),
            attempted = harvest.attempted,
            failed = harvest.failed,
            matches = matches.len(),
            "fact-check correlation finished"
        );

        let facts = Facts {
            any_debunk: matches.iter().any(ReviewMatch::is_debunk),
            any_confirmation: matches.iter().any(ReviewMatch::is_confirmation),
            count: matches.len(),
        };
        let (verdict, score) = first_match(VERDICT_TABLE, &facts)
            .map(|r| r.then)
            .unwrap_or((Verdict::Nothing, 0));
        let reason = verdict_reason(verdict, &matches);

        detail.queries_attempted = harvest.attempted;
        detail.queries_failed = harvest.failed;
        detail.errors = harvest.errors;
        detail.fact_checks = matches;

        SignalResult::new(score, Some(reason), detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ReasonType;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    fn review(publisher: &str, url: &str, rating: &str) -> FactCheckReview {
        FactCheckReview {
            publisher: Some(publisher.to_string()),
            publisher_site: None,
            url: Some(url.to_string()),
            title: None,
            rating: Some(rating.to_string()),
            rating_value: None,
            review_date: None,
            language_code: Some("en".into()),
        }
    }

    fn claim(reviews: Vec<FactCheckReview>) -> FactCheckClaim {
        FactCheckClaim {
            text: Some("claim".into()),
            claimant: None,
            claim_date: None,
            reviews,
        }
    }

    /// Replays canned responses in order and records every query.
    struct Scripted {
        replies: Mutex<Vec<Result<Vec<FactCheckClaim>, FactCheckError>>>,
        seen: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(mut replies: Vec<Result<Vec<FactCheckClaim>, FactCheckError>>) -> Arc<Self> {
            replies.reverse();
            Arc::new(Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl FactCheckService for Scripted {
        async fn search(&self, q: &str, _: &str, _: u32) -> Result<Vec<FactCheckClaim>, FactCheckError> {
            self.seen.lock().unwrap().push(q.to_string());
            self.replies.lock().unwrap().pop().unwrap_or(Ok(Vec::new()))
        }
        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    struct Slow;

    #[async_trait]
    impl FactCheckService for Slow {
        async fn search(&self, _: &str, _: &str, _: u32) -> Result<Vec<FactCheckClaim>, FactCheckError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(vec![claim(vec![review("Late", "https://late", "False")])])
        }
        fn name(&self) -> &'static str {
            "slow"
        }
    }

    const TEXT: &str = "The new vaccine alters human DNA permanently. Officials confirmed the rollout will continue nationwide. Critics argue the trial data was never published.";

    #[test]
    fn rating_priority() {
        assert_eq!(classify_rating(Some("True")), RatingVerdict::True);
        assert_eq!(classify_rating(Some("Partly true")), RatingVerdict::Mixed);
        assert_eq!(classify_rating(Some("Pants on Fire!")), RatingVerdict::False);
        assert_eq!(classify_rating(Some("Half True")), RatingVerdict::True);
        assert_eq!(classify_rating(Some("Misleading")), RatingVerdict::Mixed);
        assert_eq!(classify_rating(Some("Unproven")), RatingVerdict::Unverified);
        assert_eq!(classify_rating(Some("Satire")), RatingVerdict::Other);
        assert_eq!(classify_rating(None), RatingVerdict::Other);
        assert_eq!(RatingVerdict::False.color(), "#ef4444");
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[tokio::test]
    async fn debunk_wins_and_names_offending_publisher() {
        let svc = Scripted::new(vec![Ok(vec![claim(vec![
            review("PolitiFact", "https://a", "True"),
            review("Snopes", "https://b", "False"),
        ])])]);
        let r = FactCheckCorrelator::with_service(svc).correlate(TEXT).await;
        assert_eq!(r.score, SCORE_DEBUNKED);
        let reason = r.reason.unwrap();
        assert_eq!(reason.kind, ReasonType::Negative);
        assert!(reason.description.contains("Snopes"));
    }

    #[tokio::test]
    async fn queries_at_most_three_claims_and_dedupes_urls() {
        let dup = || Ok(vec![claim(vec![review("AFP", "https://same", "Mixed")])]);
        let svc = Scripted::new(vec![dup(), dup(), dup(), dup()]);
        let corr = FactCheckCorrelator::with_service(svc.clone());
        let r = corr.correlate(TEXT).await;
        assert_eq!(svc.seen.lock().unwrap().len(), 3);
        assert_eq!(r.detail.queries_attempted, 3);
        assert_eq!(r.detail.fact_checks.len(), 1);
        assert_eq!(r.score, 0);
        assert_eq!(r.reason.unwrap().title, "Related Fact-Checks Found");
    }

    #[tokio::test]
    async fn failures_are_skipped_not_propagated() {
        let svc = Scripted::new(vec![
            Err(FactCheckError::Http(503)),
            Err(FactCheckError::Malformed("eof".into())),
            Ok(vec![claim(vec![review("Reuters", "https://r", "Correct: true")])]),
        ]);
        let r = FactCheckCorrelator::with_service(svc).correlate(TEXT).await;
        assert_eq!(r.detail.queries_failed, 2);
        assert_eq!(r.score, SCORE_VERIFIED);
        assert!(r.reason.unwrap().description.contains("Reuters"));
    }

    #[tokio::test]
    async fn review_cap_is_five() {
        let many: Vec<_> = (0..8)
            .map(|i| review("X", &format!("https://x/{i}"), "Unproven"))
            .collect();
        let svc = Scripted::new(vec![Ok(vec![claim(many)])]);
        let r = FactCheckCorrelator::with_service(svc).correlate(TEXT).await;
        assert_eq!(r.detail.fact_checks.len(), MAX_REVIEWS);
    }

    #[tokio::test]
    async fn timeout_counts_as_failure() {
        let cfg = FactCheckConfig {
            query_timeout_ms: 20,
            max_queries: 1,
            ..Default::default()
        };
        let r = FactCheckCorrelator::new(Arc::new(Slow), &cfg).correlate(TEXT).await;
        assert_eq!(r.detail.queries_failed, 1);
        assert!(r.detail.fact_checks.is_empty());
        assert_eq!(r.score, 0);
        assert_eq!(r.reason.unwrap().title, "No Direct Fact-Checks Found");
    }

    #[tokio::test]
    async fn disabled_service_still_builds_links() {
        let corr = FactCheckCorrelator::with_service(Arc::new(DisabledFactCheck));
        let r = corr.correlate(TEXT).await;
        assert!(!r.detail.has_api_key);
        assert_eq!(r.detail.queries_attempted, 0);
        assert_eq!(r.detail.search_urls.len(), 6);
        assert!(r.detail.search_urls[1].url.contains("The+new+vaccine"));
    }

    #[test]
    fn skipped_has_no_reason() {
        let corr = FactCheckCorrelator::with_service(Arc::new(DisabledFactCheck));
        let r = corr.skipped("short text!");
        assert_eq!(r.score, 0);
        assert!(r.reason.is_none());
        assert!(r.detail.skipped);
        assert!(r.detail.search_urls[1].url.contains("short+text"));
    }
}
