//! # Scoring Aggregator
//! Runs every signal over one submission and merges them into an immutable
//! `CredibilityReport`.
//!
//! Domain, lexical and temporal analysis are synchronous; only the fact-check
//! lookup awaits. Score = clamp(sum of the six signal scores, 0, 100). Reasons
//! keep signal order within each reason type.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use metrics::counter;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use tracing::info;
use url::Url;

use crate::analyze::{
    EmotionalDetail, EvidenceDetail, LexicalAnalyzer, LexicalReport, SensationalismDetail,
};
use crate::config::ReferenceLists;
use crate::domain::{DomainClassifier, DomainDetail};
use crate::error::EvaluateError;
use crate::factcheck::{DisabledFactCheck, FactCheckCorrelator, FactCheckDetail};
use crate::logging::{anon_hash, dev_logging_enabled};
use crate::prompts::{self, PromptNeeds};
use crate::rules::{first_match, otherwise, Rule};
use crate::signal::{rank_reasons, Reason, SignalResult};
use crate::temporal::{self, TemporalDetail};

pub const MAX_SCORE: i32 = 100;
pub const GOOGLE_NEWS_SEARCH: &str = "https://news.google.com/search";
const SEARCH_WORDS: usize = 10;

static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("non-word regex"));

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct EvaluateOptions {
    /// Publication date supplied by the content fetcher; replaces in-text dates when parsable.
    pub published_date_hint: Option<String>,
    /// Skip the external fact-check lookup entirely.
    pub skip_fact_check: bool,
    /// Reference "now" for age computation; defaults to local time.
    pub as_of: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Reliable,
    NeedsCaution,
    Suspicious,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Reliable => "reliable",
            Status::NeedsCaution => "needs_caution",
            Status::Suspicious => "suspicious",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Reliable => "Likely Reliable",
            Status::NeedsCaution => "Needs Caution",
            Status::Suspicious => "Suspicious",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Status::Reliable => "green",
            Status::NeedsCaution => "yellow",
            Status::Suspicious => "red",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Status::Reliable => "verified",
            Status::NeedsCaution => "warning",
            Status::Suspicious => "error",
        }
    }
}

const STATUS_TABLE: &[Rule<i32, Status>] = &[
    Rule {
        name: "reliable",
        when: |s: &i32| *s >= 80,
        then: Status::Reliable,
    },
    Rule {
        name: "needs_caution",
        when: |s: &i32| *s >= 50,
        then: Status::NeedsCaution,
    },
    Rule {
        name: "suspicious",
        when: otherwise,
        then: Status::Suspicious,
    },
];

pub fn status_for(score: i32) -> Status {
    first_match(STATUS_TABLE, &score)
        .map(|r| r.then)
        .unwrap_or(Status::Suspicious)
}

/// Every signal, for the breakdown panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisBreakdown {
    /// Unclamped sum of the six signal scores.
    pub raw_total: i32,
    pub domain: SignalResult<DomainDetail>,
    pub emotional: SignalResult<EmotionalDetail>,
    pub sensationalism: SignalResult<SensationalismDetail>,
    pub evidence: SignalResult<EvidenceDetail>,
    pub temporal: SignalResult<TemporalDetail>,
    pub fact_check: SignalResult<FactCheckDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredibilityReport {
    pub score: i32,
    pub status: Status,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub status_icon: &'static str,
    pub summary: String,
    pub reasons: Vec<Reason>,
    pub thinking_prompts: Vec<String>,
    pub recommendation: String,
    pub search_url: String,
    pub analysis_breakdown: AnalysisBreakdown,
}

struct Signals {
    domain: SignalResult<DomainDetail>,
    lexical: LexicalReport,
    temporal: SignalResult<TemporalDetail>,
    fact_check: SignalResult<FactCheckDetail>,
}

/// Shared, immutable evaluation pipeline. Cheap to share behind an `Arc`.
pub struct Evaluator {
    lists: Arc<ReferenceLists>,
    lexical: LexicalAnalyzer,
    fact_check: FactCheckCorrelator,
}

impl Evaluator {
    pub fn new(lists: Arc<ReferenceLists>, fact_check: FactCheckCorrelator) -> Self {
        let lexical = LexicalAnalyzer::new(&lists);
        Self {
            lists,
            lexical,
            fact_check,
        }
    }

    /// Evaluator whose fact-check stage never leaves the process.
    pub fn offline(lists: Arc<ReferenceLists>) -> Self {
        Self::new(lists, FactCheckCorrelator::with_service(Arc::new(DisabledFactCheck)))
    }

    pub fn lists(&self) -> &ReferenceLists {
        &self.lists
    }

    pub fn fact_check_service(&self) -> &'static str {
        self.fact_check.service_name()
    }

    pub async fn evaluate(
        &self,
        text: &str,
        opts: EvaluateOptions,
    ) -> Result<CredibilityReport, EvaluateError> {
        let signals = self.gather(text, &opts).await?;
        let report = {
            let mut rng = rand::rng();
            self.assemble(text, signals, &mut rng)
        };
        Ok(report)
    }

    /// Same as `evaluate` with a caller-supplied prompt random source.
    pub async fn evaluate_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        opts: EvaluateOptions,
        rng: &mut R,
    ) -> Result<CredibilityReport, EvaluateError> {
        let signals = self.gather(text, &opts).await?;
        Ok(self.assemble(text, signals, rng))
    }

    async fn gather(&self, text: &str, opts: &EvaluateOptions) -> Result<Signals, EvaluateError> {
        if text.trim().is_empty() {
            return Err(EvaluateError::EmptyText);
        }
        let now = opts.as_of.unwrap_or_else(|| Local::now().naive_local());

        let domain = DomainClassifier::new(&self.lists).classify(text);
        let lexical = self.lexical.analyze(text);
        let temporal = temporal::analyze(text, opts.published_date_hint.as_deref(), now);
        let fact_check = if opts.skip_fact_check {
            self.fact_check.skipped(text)
        } else {
            self.fact_check.correlate(text).await
        };

        Ok(Signals {
            domain,
            lexical,
            temporal,
            fact_check,
        })
    }

    fn assemble<R: Rng + ?Sized>(&self, text: &str, s: Signals, rng: &mut R) -> CredibilityReport {
        let raw_total = s.domain.score
            + s.lexical.total()
            + s.temporal.score
            + s.fact_check.score;
        let score = raw_total.clamp(0, MAX_SCORE);
        let status = status_for(score);

        let reasons = rank_reasons(
            [
                s.domain.reason.clone(),
                s.lexical.emotional.reason.clone(),
                s.lexical.sensationalism.reason.clone(),
                s.lexical.evidence.reason.clone(),
                s.temporal.reason.clone(),
                s.fact_check.reason.clone(),
            ]
            .into_iter()
            .flatten()
            .collect(),
        );

        let summary = summarize(status, &s);
        let needs = PromptNeeds {
            emotional: s.lexical.emotional.score < crate::analyze::emotional::MAX_SCORE,
            source: !s.domain.detail.is_trusted,
            evidence: s.lexical.evidence.score < crate::analyze::evidence::MAX_SCORE,
            date: s.temporal.detail.is_outdated || s.temporal.detail.is_very_old,
        };
        let thinking_prompts = prompts::select(needs, rng);
        let recommendation = recommend(status, s.temporal.detail.is_very_old);
        let search_url = news_search_url(text);

        counter!("credibility_evaluations_total", "status" => status.as_str()).increment(1);
        if dev_logging_enabled() {
            info!(
                target: "evaluate",
                id = %anon_hash(text),
                score,
                raw_total,
                status = status.as_str(),
                reasons = reasons.len(),
                fact_checks = s.fact_check.detail.fact_checks.len(),
                "evaluation complete"
            );
        }

        CredibilityReport {
            score,
            status,
            status_label: status.label(),
            status_color: status.color(),
            status_icon: status.icon(),
            summary,
            reasons,
            thinking_prompts,
            recommendation,
            search_url,
            analysis_breakdown: AnalysisBreakdown {
                raw_total,
                domain: s.domain,
                emotional: s.lexical.emotional,
                sensationalism: s.lexical.sensationalism,
                evidence: s.lexical.evidence,
                temporal: s.temporal,
                fact_check: s.fact_check,
            },
        }
    }
}

/// "a", "a and b", "a, b and c".
fn join_issues(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => (*one).to_string(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

fn summarize(status: Status, s: &Signals) -> String {
    match status {
        Status::Reliable if s.domain.detail.is_trusted => {
            "This content appears credible and comes from a trusted source. The writing style is professional and evidence-based.".to_string()
        }
        Status::Reliable => {
            "This content shows signs of reliable reporting with professional language and cited sources.".to_string()
        }
        Status::NeedsCaution => {
            let mut issues = Vec::new();
            if s.domain.detail.detected.is_some() && !s.domain.detail.is_trusted {
                issues.push("unknown source");
            }
            if s.lexical.emotional.score < crate::analyze::emotional::MAX_SCORE {
                issues.push("emotional language");
            }
            if s.lexical.evidence.score < crate::analyze::evidence::MAX_SCORE {
                issues.push("limited evidence");
            }
            if s.temporal.detail.is_outdated || s.temporal.detail.is_very_old {
                issues.push("older publication");
            }
            if issues.is_empty() {
                "This content shows mixed credibility signals. We recommend verifying with additional sources.".to_string()
            } else {
                format!(
                    "This content shows mixed credibility signals including {}. We recommend verifying with additional sources.",
                    join_issues(&issues)
                )
            }
        }
        Status::Suspicious => {
            "This content shows multiple warning signs that suggest low credibility. Please verify thoroughly before trusting or sharing.".to_string()
        }
    }
}

const VERY_OLD_CAVEAT: &str = " This content also references information that is more than two years old, so check whether newer reporting has superseded it.";

fn recommend(status: Status, very_old: bool) -> String {
    let base = match status {
        Status::Reliable => "This content appears reliable, but we always encourage verifying important information with multiple sources.",
        Status::NeedsCaution => "We recommend cross-checking this information with established news organizations before sharing it on social media.",
        Status::Suspicious => "Please verify this information thoroughly with official sources before believing or sharing. Consider checking fact-checking websites.",
    };
    if very_old {
        format!("{base}{VERY_OLD_CAVEAT}")
    } else {
        base.to_string()
    }
}

/// Google News search over the first ten words longer than three characters.
pub fn news_search_url(text: &str) -> String {
    let stripped = NON_WORD_RE.replace_all(text, "");
    let words: Vec<&str> = stripped
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .take(SEARCH_WORDS)
        .collect();
    let q = words.join(" ");
    Url::parse_with_params(GOOGLE_NEWS_SEARCH, &[("q", q.as_str())])
        .map(String::from)
        .unwrap_or_else(|_| GOOGLE_NEWS_SEARCH.to_string())
}
