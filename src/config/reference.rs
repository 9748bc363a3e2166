//! # Reference Lists
//!
//! Immutable configuration injected into every analyzer: domain reputation
//! lists and all vocabulary lists (emotional words, clickbait phrases,
//! evidence markers, AI-essay transitions).
//!
//! - Loads from TOML or JSON (`$CREDIBILITY_REFERENCE_PATH`, then
//!   `config/reference.toml`, then `config/reference.json`).
//! - Missing fields fall back to the built-in seed, field by field.
//! - Entries are trimmed, lower-cased and deduplicated (order preserved).

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_REFERENCE_PATH: &str = "CREDIBILITY_REFERENCE_PATH";
pub const DEFAULT_REFERENCE_TOML: &str = "config/reference.toml";
pub const DEFAULT_REFERENCE_JSON: &str = "config/reference.json";

/// Static reference data. Construct once, share read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLists {
    /// Matched by exact or subdomain-suffix equality.
    pub trusted_domains: Vec<String>,
    /// Matched by exact equality.
    pub suspicious_domains: Vec<String>,
    /// Matched by substring containment.
    pub suspicious_patterns: Vec<String>,
    /// Whole-word, case-insensitive.
    pub emotional_words: Vec<String>,
    pub clickbait_phrases: Vec<String>,
    pub vague_evidence_phrases: Vec<String>,
    pub strong_evidence_markers: Vec<String>,
    pub ai_transition_phrases: Vec<String>,
}

/// On-disk shape: every list optional so partial overrides stay small.
#[derive(Debug, Default, Deserialize)]
struct ReferenceFile {
    trusted_domains: Option<Vec<String>>,
    suspicious_domains: Option<Vec<String>>,
    suspicious_patterns: Option<Vec<String>>,
    emotional_words: Option<Vec<String>>,
    clickbait_phrases: Option<Vec<String>>,
    vague_evidence_phrases: Option<Vec<String>>,
    strong_evidence_markers: Option<Vec<String>>,
    ai_transition_phrases: Option<Vec<String>>,
}

impl Default for ReferenceLists {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl ReferenceLists {
    /// Load from an explicit path. Format is chosen by extension (`.toml` or JSON otherwise).
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading reference lists from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::parse(&content, ext.as_str())
            .with_context(|| format!("parsing reference lists in {}", path.display()))
    }

    /// Env var + fallbacks:
    /// 1) $CREDIBILITY_REFERENCE_PATH (must exist)
    /// 2) config/reference.toml
    /// 3) config/reference.json
    /// 4) built-in seed
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_REFERENCE_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!(
                "{ENV_REFERENCE_PATH} points to non-existent path {}",
                pb.display()
            ));
        }
        for candidate in [DEFAULT_REFERENCE_TOML, DEFAULT_REFERENCE_JSON] {
            let pb = PathBuf::from(candidate);
            if pb.exists() {
                return Self::load_from(&pb);
            }
        }
        Ok(Self::default_seed())
    }

    fn parse(s: &str, hint_ext: &str) -> Result<Self> {
        let file: ReferenceFile = if hint_ext == "toml" {
            toml::from_str(s)?
        } else {
            serde_json::from_str(s)?
        };
        Ok(Self::from_file(file))
    }

    fn from_file(file: ReferenceFile) -> Self {
        let seed = Self::default_seed();
        let pick = |v: Option<Vec<String>>, fallback: Vec<String>| match v {
            Some(items) => clean_list(items),
            None => fallback,
        };
        Self {
            trusted_domains: pick(file.trusted_domains, seed.trusted_domains),
            suspicious_domains: pick(file.suspicious_domains, seed.suspicious_domains),
            suspicious_patterns: pick(file.suspicious_patterns, seed.suspicious_patterns),
            emotional_words: pick(file.emotional_words, seed.emotional_words),
            clickbait_phrases: pick(file.clickbait_phrases, seed.clickbait_phrases),
            vague_evidence_phrases: pick(file.vague_evidence_phrases, seed.vague_evidence_phrases),
            strong_evidence_markers: pick(
                file.strong_evidence_markers,
                seed.strong_evidence_markers,
            ),
            ai_transition_phrases: pick(file.ai_transition_phrases, seed.ai_transition_phrases),
        }
    }

    /// Built-in seed used when no config file is present.
    pub fn default_seed() -> Self {
        Self {
            trusted_domains: owned(&[
                "reuters.com",
                "apnews.com",
                "bbc.com",
                "bbc.co.uk",
                "npr.org",
                "pbs.org",
                "nytimes.com",
                "washingtonpost.com",
                "wsj.com",
                "ft.com",
                "bloomberg.com",
                "economist.com",
                "theguardian.com",
                "aljazeera.com",
                "cnn.com",
                "cbsnews.com",
                "nbcnews.com",
                "abcnews.go.com",
                "usatoday.com",
                "thehindu.com",
                "indianexpress.com",
                "hindustantimes.com",
                "ndtv.com",
                "pib.gov.in",
                "who.int",
                "cdc.gov",
                "nih.gov",
                "nasa.gov",
                "nature.com",
                "science.org",
                "snopes.com",
                "politifact.com",
                "factcheck.org",
                "fullfact.org",
                "altnews.in",
                "boomlive.in",
            ]),
            suspicious_domains: owned(&[
                "abcnews.com.co",
                "worldnewsdailyreport.com",
                "empirenews.net",
                "nationalreport.net",
                "huzlers.com",
                "newsbreakshere.com",
                "beforeitsnews.com",
                "yournewswire.com",
                "naturalnews.com",
                "infowars.com",
            ]),
            suspicious_patterns: owned(&[
                ".com.co",
                "breaking-news",
                "viralnews",
                "truthfeed",
                "dailybuzz",
                "news-flash",
                "realtruth",
            ]),
            emotional_words: owned(&[
                // fear
                "terrifying",
                "horrifying",
                "shocking",
                "alarming",
                "devastating",
                "catastrophic",
                "crisis",
                "emergency",
                "urgent",
                "danger",
                "deadly",
                "fatal",
                "lethal",
                "nightmare",
                "horror",
                "terror",
                "panic",
                "doomed",
                "destroyed",
                "chaos",
                "collapse",
                "disaster",
                "apocalypse",
                // anger
                "outrage",
                "outrageous",
                "scandalous",
                "disgrace",
                "disgusting",
                "shameful",
                "unbelievable",
                "unacceptable",
                "corrupt",
                "evil",
                "betrayal",
                "traitor",
                "treachery",
                "villain",
                "criminal",
                // sensational adjectives
                "incredible",
                "mind-blowing",
                "jaw-dropping",
                "earth-shattering",
                "game-changing",
                "revolutionary",
                "explosive",
                "bombshell",
                "breaking",
                "exclusive",
                "secret",
                "hidden",
                "exposed",
                "revealed",
                "leaked",
                "banned",
                "censored",
                "suppressed",
            ]),
            clickbait_phrases: owned(&[
                "you won't believe",
                "what happens next",
                "doctors hate",
                "one weird trick",
                "they don't want you to know",
                "the truth about",
                "exposed",
                "government doesn't want",
                "media won't tell you",
                "finally revealed",
                "breaking news",
                "just in",
                "developing story",
                "this changes everything",
                "share before deleted",
                "going viral",
                "must see",
                "must read",
                "urgent warning",
            ]),
            vague_evidence_phrases: owned(&[
                "according to experts",
                "experts say",
                "scientists say",
                "researchers say",
                "sources say",
                "sources confirm",
                "officials say",
                "authorities say",
                "studies show",
                "research shows",
                "data shows",
                "reports indicate",
                "experts believe",
                "many believe",
                "some say",
                "it is believed",
                "it is reported",
                "according to sources",
                "insiders say",
                "witnesses claim",
            ]),
            strong_evidence_markers: owned(&[
                // named organizations
                "according to the",
                "published in",
                "study by",
                "report by",
                "statement from",
                "announced by",
                "confirmed by",
                // official sources
                "ministry of",
                "department of",
                "government of",
                "official website",
                "press release",
                "official statement",
                // academic
                "peer-reviewed",
                "journal",
                "university",
                "institute",
                "research paper",
                "published study",
                // direct attribution
                "said in an interview",
                "told reporters",
                "in a statement",
                "spokesperson for",
                "representative of",
                // fact-checking
                "fact-check",
                "verified by",
                "debunked",
                "confirmed",
            ]),
            ai_transition_phrases: owned(&[
                "in conclusion",
                "it is important to note",
                "it is worth noting",
                "in summary",
                "to summarize",
                "in light of",
                "in the wake of",
                "moving forward",
                "at the end of the day",
                "all things considered",
                "be that as it may",
                "having said that",
                "on the other hand",
                "furthermore",
                "nevertheless",
                "notwithstanding",
            ]),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Trim, lower-case, drop empties and duplicates while keeping first-seen order.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_no_duplicates() {
        let seed = ReferenceLists::default_seed();
        for list in [
            &seed.trusted_domains,
            &seed.emotional_words,
            &seed.clickbait_phrases,
            &seed.strong_evidence_markers,
        ] {
            assert_eq!(clean_list(list.clone()).len(), list.len());
        }
    }

    #[test]
    fn partial_json_overrides_only_named_lists() {
        let json = r#"{ "trusted_domains": [" Example.ORG ", "", "example.org"] }"#;
        let lists = ReferenceLists::parse(json, "json").unwrap();
        assert_eq!(lists.trusted_domains, vec!["example.org".to_string()]);
        assert_eq!(
            lists.emotional_words,
            ReferenceLists::default_seed().emotional_words
        );
    }

    #[test]
    fn toml_format_is_supported() {
        let toml = r#"
suspicious_patterns = ["fakesite"]
clickbait_phrases = ["Shocking Twist"]
"#;
        let lists = ReferenceLists::parse(toml, "toml").unwrap();
        assert_eq!(lists.suspicious_patterns, vec!["fakesite".to_string()]);
        assert_eq!(lists.clickbait_phrases, vec!["shocking twist".to_string()]);
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(ReferenceLists::parse("{ not json", "json").is_err());
    }
}
