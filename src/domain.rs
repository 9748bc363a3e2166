//! # Domain Trust Classifier
//!
//! Extracts the first domain mentioned in a submission and classifies it
//! against the injected trusted/suspicious lists.
//!
//! Extraction order: URL with protocol, then a bare domain restricted to a
//! fixed set of suffixes. Result is lower-cased with any leading `www.` removed.
//!
//! Classification (first match wins): no domain → trusted → suspicious → unknown.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::ReferenceLists;
use crate::rules::{first_match, otherwise, Rule};
use crate::signal::{Reason, SignalResult};

static URL_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://(?:www\.)?([a-z0-9-]+(?:\.[a-z0-9-]+)+)").expect("url domain regex")
});

static BARE_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:www\.)?([a-z0-9-]+\.(?:com|org|net|gov|edu|co\.uk|co\.in|in|io|news|info|biz|tv|me|us|ca|au)(?:\.[a-z]{2,})?)\b",
    )
    .expect("bare domain regex")
});

pub const SCORE_TRUSTED: i32 = 30;
pub const SCORE_UNKNOWN: i32 = 15;
pub const SCORE_SUSPICIOUS: i32 = 0;

/// Diagnostic detail for the breakdown panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainDetail {
    pub detected: Option<String>,
    pub is_trusted: bool,
    pub is_suspicious: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trust {
    Missing,
    Trusted,
    Suspicious,
    Unknown,
}

struct Facts {
    has_domain: bool,
    trusted: bool,
    suspicious: bool,
}

const TRUST_TABLE: &[Rule<Facts, Trust>] = &[
    Rule {
        name: "no_domain",
        when: |f: &Facts| !f.has_domain,
        then: Trust::Missing,
    },
    Rule {
        name: "trusted",
        when: |f: &Facts| f.trusted,
        then: Trust::Trusted,
    },
    Rule {
        name: "suspicious",
        when: |f: &Facts| f.suspicious,
        then: Trust::Suspicious,
    },
    Rule {
        name: "unknown",
        when: otherwise,
        then: Trust::Unknown,
    },
];

/// Extract the first domain from free text or a URL.
pub fn extract_domain(text: &str) -> Option<String> {
    let raw = URL_DOMAIN_RE
        .captures(text)
        .or_else(|| BARE_DOMAIN_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())?;
    Some(match raw.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => raw,
    })
}

/// Exact or subdomain match against the trusted list.
pub fn is_trusted(domain: &str, lists: &ReferenceLists) -> bool {
    lists.trusted_domains.iter().any(|t| {
        domain == t
            || domain
                .strip_suffix(t.as_str())
                .is_some_and(|head| head.ends_with('.'))
    })
}

/// Exact match against suspicious domains or substring match against patterns.
pub fn is_suspicious(domain: &str, lists: &ReferenceLists) -> bool {
    lists.suspicious_domains.iter().any(|s| s == domain)
        || lists
            .suspicious_patterns
            .iter()
            .any(|p| domain.contains(p.as_str()))
}

/// Stateless classifier over injected reference lists.
#[derive(Debug, Clone)]
pub struct DomainClassifier<'a> {
    lists: &'a ReferenceLists,
}

impl<'a> DomainClassifier<'a> {
    pub fn new(lists: &'a ReferenceLists) -> Self {
        Self { lists }
    }

    pub fn classify(&self, text: &str) -> SignalResult<DomainDetail> {
        let domain = extract_domain(text);
        let facts = Facts {
            has_domain: domain.is_some(),
            trusted: domain.as_deref().is_some_and(|d| is_trusted(d, self.lists)),
            suspicious: domain
                .as_deref()
                .is_some_and(|d| is_suspicious(d, self.lists)),
        };
        let trust = first_match(TRUST_TABLE, &facts)
            .map(|rule| rule.then)
            .unwrap_or(Trust::Unknown);

        let detail = DomainDetail {
            detected: domain.clone(),
            is_trusted: trust == Trust::Trusted,
            is_suspicious: trust == Trust::Suspicious,
        };
        let name = domain.unwrap_or_default();

        match trust {
            Trust::Missing => SignalResult::new(
                SCORE_UNKNOWN,
                Some(Reason::info(
                    "No Source URL Detected",
                    "No website link was found in the content. Consider checking if this information comes from a reliable source.",
                )),
                detail,
            ),
            Trust::Trusted => SignalResult::new(
                SCORE_TRUSTED,
                Some(Reason::positive(
                    "Verified Source Domain",
                    format!("\"{name}\" is recognized as a trusted and established news source."),
                )),
                detail,
            ),
            Trust::Suspicious => SignalResult::new(
                SCORE_SUSPICIOUS,
                Some(Reason::negative(
                    "Suspicious Source Domain",
                    format!("\"{name}\" has been flagged for spreading unreliable content in the past."),
                )),
                detail,
            ),
            Trust::Unknown => SignalResult::new(
                SCORE_UNKNOWN,
                Some(Reason::warning(
                    "Unknown Source Domain",
                    format!("\"{name}\" is not in our database of verified sources. Exercise caution."),
                )),
                detail,
            ),
        }
    }
}
