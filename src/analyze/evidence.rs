//! Evidence quality subscore (0–25), tiered by specificity.
//!
//! Strong markers (named organizations, academic sources, direct attribution)
//! outrank vague hedges ("experts say"). A flat penalty applies when the prose
//! reads like a templated essay (three or more stock transition phrases).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::ReferenceLists;
use crate::rules::{first_match, otherwise, Rule};
use crate::signal::{Reason, SignalResult};

pub const MAX_SCORE: i32 = 25;
pub const TEMPLATED_PROSE_PENALTY: i32 = 8;
pub const TEMPLATED_PROSE_MIN_HITS: usize = 3;

static QUOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""[^"]+"|“[^”]+”|‘[^’]+’"#).expect("quote regex")
});
static NAMED_ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("named entity regex")
});
static STATISTIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+%|\d+\s*(?:percent|million|billion|thousand)").expect("statistic regex")
});
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://\S+").expect("url regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceQuality {
    Strong,
    Good,
    Moderate,
    Weak,
    None,
}

impl EvidenceQuality {
    pub fn base_score(self) -> i32 {
        match self {
            EvidenceQuality::Strong => 25,
            EvidenceQuality::Good => 18,
            EvidenceQuality::Moderate => 12,
            EvidenceQuality::Weak => 6,
            EvidenceQuality::None => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceDetail {
    pub strong_evidence_count: usize,
    pub vague_evidence_count: usize,
    pub found_strong_evidence: Vec<String>,
    pub found_vague_evidence: Vec<String>,
    pub ai_red_flag_count: usize,
    pub has_quotes: bool,
    pub has_named_sources: bool,
    pub has_statistics: bool,
    pub has_urls: bool,
    pub evidence_quality: EvidenceQuality,
}

struct Facts {
    strong: usize,
    vague: usize,
    quotes: bool,
    named: bool,
    stats: bool,
    urls: bool,
}

const QUALITY_TABLE: &[Rule<Facts, EvidenceQuality>] = &[
    Rule {
        name: "strong",
        when: |f: &Facts| f.strong >= 2 && (f.quotes || f.named || f.urls),
        then: EvidenceQuality::Strong,
    },
    Rule {
        name: "good",
        when: |f: &Facts| f.strong >= 1 && f.stats,
        then: EvidenceQuality::Good,
    },
    Rule {
        name: "moderate",
        when: |f: &Facts| f.vague >= 2 && f.quotes && f.named,
        then: EvidenceQuality::Moderate,
    },
    Rule {
        name: "weak",
        when: |f: &Facts| f.vague >= 1 || f.stats,
        then: EvidenceQuality::Weak,
    },
    Rule {
        name: "none",
        when: otherwise,
        then: EvidenceQuality::None,
    },
];

#[derive(Debug, Clone)]
pub struct EvidenceAnalyzer {
    vague: Vec<String>,
    strong: Vec<String>,
    transitions: Vec<String>,
}

impl EvidenceAnalyzer {
    pub fn new(lists: &ReferenceLists) -> Self {
        Self {
            vague: lists.vague_evidence_phrases.clone(),
            strong: lists.strong_evidence_markers.clone(),
            transitions: lists.ai_transition_phrases.clone(),
        }
    }

    pub fn analyze(&self, text: &str) -> SignalResult<EvidenceDetail> {
        let lower = text.to_lowercase();
        let hits = |list: &[String]| -> Vec<String> {
            list.iter()
                .filter(|p| lower.contains(p.as_str()))
                .cloned()
                .collect()
        };

        let found_vague = hits(&self.vague);
        let found_strong = hits(&self.strong);
        let ai_red_flag_count = hits(&self.transitions).len();

        let facts = Facts {
            strong: found_strong.len(),
            vague: found_vague.len(),
            quotes: QUOTE_RE.is_match(text),
            named: NAMED_ENTITY_RE.find_iter(text).count() >= 2,
            stats: STATISTIC_RE.is_match(text),
            urls: URL_RE.is_match(text),
        };
        let quality = first_match(QUALITY_TABLE, &facts)
            .map(|r| r.then)
            .unwrap_or(EvidenceQuality::None);

        let mut score = quality.base_score();
        if ai_red_flag_count >= TEMPLATED_PROSE_MIN_HITS {
            score = (score - TEMPLATED_PROSE_PENALTY).max(0);
        }

        let reason = match quality {
            EvidenceQuality::Strong => Reason::positive(
                "Strong Evidence Present",
                "The content cites specific sources, named experts, or provides verifiable data points.",
            ),
            EvidenceQuality::Good => Reason::positive(
                "Evidence and Sources Present",
                "The content references specific sources with supporting data.",
            ),
            EvidenceQuality::Moderate => Reason::info(
                "Limited Evidence Present",
                "Some references to sources exist, but verification is recommended.",
            ),
            EvidenceQuality::Weak => Reason::warning(
                "Vague or Unverifiable Sources",
                match found_vague.first() {
                    Some(phrase) => format!(
                        "Uses vague phrases like \"{phrase}\" without naming specific sources. This is a common pattern in misinformation."
                    ),
                    None => "Limited evidence present. Verify claims independently.".to_string(),
                },
            ),
            EvidenceQuality::None => Reason::negative(
                "No Verifiable Sources",
                "The content does not cite any specific, verifiable sources. Treat claims with skepticism.",
            ),
        };

        SignalResult::new(
            score,
            Some(reason),
            EvidenceDetail {
                strong_evidence_count: facts.strong,
                vague_evidence_count: facts.vague,
                found_strong_evidence: found_strong.into_iter().take(5).collect(),
                found_vague_evidence: found_vague.into_iter().take(5).collect(),
                ai_red_flag_count,
                has_quotes: facts.quotes,
                has_named_sources: facts.named,
                has_statistics: facts.stats,
                has_urls: facts.urls,
                evidence_quality: quality,
            },
        )
    }
}
