//! Emotional tone subscore (0–25).
//!
//! Whole-word counts of emotional vocabulary plus substring hits on clickbait
//! phrases. Density is emotional hits per 100 whitespace tokens.

use regex::Regex;
use serde::Serialize;

use crate::config::ReferenceLists;
use crate::rules::{first_match, otherwise, Rule};
use crate::signal::{Reason, SignalResult};

pub const MAX_SCORE: i32 = 25;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionalDetail {
    pub emotional_count: usize,
    pub emotional_density: f64,
    pub clickbait_count: usize,
    pub found_emotional_words: Vec<String>,
    pub found_clickbait: Vec<String>,
}

struct Facts {
    density: f64,
    clickbait: usize,
}

const TONE_TABLE: &[Rule<Facts, i32>] = &[
    Rule {
        name: "charged",
        when: |f: &Facts| f.density > 5.0 || f.clickbait >= 2,
        then: 0,
    },
    Rule {
        name: "elevated",
        when: |f: &Facts| f.density > 2.0 || f.clickbait >= 1,
        then: 12,
    },
    Rule {
        name: "neutral",
        when: otherwise,
        then: MAX_SCORE,
    },
];

/// Precompiled whole-word matchers for the emotional vocabulary.
#[derive(Debug, Clone)]
pub struct EmotionalToneAnalyzer {
    words: Vec<(String, Regex)>,
    clickbait: Vec<String>,
}

impl EmotionalToneAnalyzer {
    pub fn new(lists: &ReferenceLists) -> Self {
        let words = lists
            .emotional_words
            .iter()
            .filter_map(|w| {
                let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(w))).ok()?;
                Some((w.clone(), re))
            })
            .collect();
        Self {
            words,
            clickbait: lists.clickbait_phrases.clone(),
        }
    }

    pub fn analyze(&self, text: &str) -> SignalResult<EmotionalDetail> {
        let lower = text.to_lowercase();
        let total_words = lower.split_whitespace().count();

        let mut emotional_count = 0usize;
        let mut found_words: Vec<String> = Vec::new();
        for (word, re) in &self.words {
            let hits = re.find_iter(&lower).count();
            if hits > 0 {
                emotional_count += hits;
                found_words.push(word.clone());
            }
        }

        let found_clickbait: Vec<String> = self
            .clickbait
            .iter()
            .filter(|p| lower.contains(p.as_str()))
            .cloned()
            .collect();

        let density = if total_words > 0 {
            emotional_count as f64 / total_words as f64 * 100.0
        } else {
            0.0
        };

        let facts = Facts {
            density,
            clickbait: found_clickbait.len(),
        };
        let score = first_match(TONE_TABLE, &facts)
            .map(|r| r.then)
            .unwrap_or(MAX_SCORE);

        let reason = (score < MAX_SCORE).then(|| {
            let description = if found_words.is_empty() {
                "Contains clickbait phrases designed to provoke strong reactions.".to_string()
            } else {
                let shown: Vec<&str> = found_words.iter().take(3).map(String::as_str).collect();
                format!(
                    "Uses emotionally charged words like \"{}\" which may influence your judgment.",
                    shown.join("\", \"")
                )
            };
            if score == 0 {
                Reason::negative("Emotional Language Detected", description)
            } else {
                Reason::warning("Emotional Language Detected", description)
            }
        });

        found_words.truncate(5);
        SignalResult::new(
            score,
            reason,
            EmotionalDetail {
                emotional_count,
                emotional_density: (density * 100.0).round() / 100.0,
                clickbait_count: facts.clickbait,
                found_emotional_words: found_words,
                found_clickbait,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ReasonType;

    fn analyzer() -> EmotionalToneAnalyzer {
        EmotionalToneAnalyzer::new(&ReferenceLists::default_seed())
    }

    #[test]
    fn calm_text_gets_full_score_without_reason() {
        let r = analyzer().analyze(
            "The committee reviewed the annual budget and approved funding for road repairs.",
        );
        assert_eq!(r.score, MAX_SCORE);
        assert!(r.reason.is_none());
        assert_eq!(r.detail.emotional_count, 0);
    }

    #[test]
    fn whole_word_only() {
        // "crisis" must not match inside "crisiscenter".
        let r = analyzer().analyze("Visit the crisiscenter office for forms and details today please.");
        assert_eq!(r.detail.emotional_count, 0);
    }

    #[test]
    fn one_clickbait_phrase_is_a_warning() {
        let r = analyzer().analyze(
            "This changes everything for the local library schedule next month and beyond, officials wrote in the notice to patrons.",
        );
        assert_eq!(r.detail.clickbait_count, 1);
        assert_eq!(r.score, 12);
        let reason = r.reason.unwrap();
        assert_eq!(reason.kind, ReasonType::Warning);
        assert!(reason.description.contains("clickbait"));
    }

    #[test]
    fn dense_emotional_language_is_negative() {
        let r = analyzer().analyze("Shocking disaster! Terrifying chaos and panic everywhere.");
        assert_eq!(r.score, 0);
        let reason = r.reason.unwrap();
        assert_eq!(reason.kind, ReasonType::Negative);
        assert!(reason.description.contains("terrifying"));
    }

    #[test]
    fn two_clickbait_phrases_zero_score() {
        let r = analyzer().analyze(
            "You won't believe what happens next in the quarterly planning meeting of the garden club members.",
        );
        assert!(r.detail.clickbait_count >= 2);
        assert_eq!(r.score, 0);
    }
}
