//! Candidate claim extraction for fact-check lookups.

use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_CLAIMS: usize = 5;
const LEAD_SENTENCES: usize = 3;
const MIN_SENTENCE_CHARS: usize = 20;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("url regex"));
static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence split regex"));
static QUOTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]{20,})"|“([^”]{20,})”"#).expect("quoted claim regex")
});
static REPORTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:claim(?:s|ed)?|said|stated|announced|reported)\s*(?:that)?\s*([^.!?]{20,})")
        .expect("reported claim regex")
});

/// Lead sentences, quoted spans, then objects of reporting verbs.
/// Exact duplicates are dropped; order is kept; at most `MAX_CLAIMS`.
pub fn extract_claims(text: &str) -> Vec<String> {
    let cleaned = URL_RE.replace_all(text, "");

    let mut candidates: Vec<String> = SENTENCE_SPLIT_RE
        .split(&cleaned)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .take(LEAD_SENTENCES)
        .map(str::to_string)
        .collect();

    candidates.extend(QUOTED_RE.captures_iter(text).filter_map(|c| {
        c.get(1)
            .or_else(|| c.get(2))
            .map(|m| m.as_str().to_string())
    }));

    candidates.extend(
        REPORTED_RE
            .captures_iter(text)
            .filter_map(|c| c.get(1).map(|m| m.as_str().trim().to_string())),
    );

    let mut out: Vec<String> = Vec::with_capacity(MAX_CLAIMS);
    for c in candidates {
        if !out.contains(&c) {
            out.push(c);
        }
        if out.len() == MAX_CLAIMS {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn lead_sentences_skip_short_ones_and_urls() {
        let claims = extract_claims(
            "Read this. https://example.com/a-very-long-path-that-is-not-a-claim The mayor will resign by Friday afternoon! Too short? Turnout in the northern districts doubled this year.",
        );
        assert_eq!(claims[0], "The mayor will resign by Friday afternoon");
        assert_eq!(claims[1], "Turnout in the northern districts doubled this year");
    }

    #[test]
    fn quotes_and_reporting_verbs_are_added() {
        let claims = extract_claims(
            "Ok. The minister said that the new bridge will open next spring. \"Every household will receive a rebate check\"",
        );
        assert!(claims.contains(&"Every household will receive a rebate check".to_string()));
        assert!(claims.contains(&"the new bridge will open next spring".to_string()));
    }

    #[test]
    fn deduplicated_and_capped() {
        let s = "The governor announced that taxes will fall next year. ";
        let text = s.repeat(4) + "Officials claimed budgets are balanced across every agency. Officials reported record tourism numbers this summer.";
        let claims = extract_claims(&text);
        assert!(claims.len() <= MAX_CLAIMS);
        let unique: HashSet<&String> = claims.iter().collect();
        assert_eq!(unique.len(), claims.len());
        assert_eq!(claims[0], "The governor announced that taxes will fall next year");
    }

    #[test]
    fn nothing_to_extract() {
        assert!(extract_claims("too short. also short!").is_empty());
    }
}
