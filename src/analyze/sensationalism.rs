//! Sensationalism subscore (0–20): ALL CAPS shouting and exclamation marks.

use serde::Serialize;

use crate::rules::{first_match, otherwise, Rule};
use crate::signal::{Reason, SignalResult};

pub const MAX_SCORE: i32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensationalismDetail {
    pub caps_words_count: usize,
    pub caps_percentage: f64,
    pub exclamation_count: usize,
    pub question_count: usize,
}

struct Facts {
    caps_pct: f64,
    exclamations: usize,
}

const STYLE_TABLE: &[Rule<Facts, i32>] = &[
    Rule {
        name: "shouting",
        when: |f: &Facts| f.caps_pct > 10.0 || f.exclamations > 5,
        then: 0,
    },
    Rule {
        name: "raised",
        when: |f: &Facts| f.caps_pct > 5.0 || f.exclamations > 2,
        then: 10,
    },
    Rule {
        name: "measured",
        when: otherwise,
        then: MAX_SCORE,
    },
];

/// A token counts as shouting when its ASCII letters number at least three
/// and are all upper-case.
fn is_caps_word(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(char::is_ascii_alphabetic).collect();
    letters.len() >= 3 && letters.iter().all(char::is_ascii_uppercase)
}

pub fn analyze(text: &str) -> SignalResult<SensationalismDetail> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let total = tokens.len();
    let caps_words_count = tokens.iter().filter(|t| is_caps_word(t)).count();
    let exclamation_count = text.matches('!').count();
    let question_count = text.matches('?').count();

    let caps_pct = if total > 0 {
        caps_words_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let facts = Facts {
        caps_pct,
        exclamations: exclamation_count,
    };
    let score = first_match(STYLE_TABLE, &facts)
        .map(|r| r.then)
        .unwrap_or(MAX_SCORE);

    let reason = (score < MAX_SCORE).then(|| {
        let mut issues = Vec::new();
        if caps_pct > 5.0 {
            issues.push("excessive ALL CAPS text");
        }
        if exclamation_count > 2 {
            issues.push("multiple exclamation marks");
        }
        let description = format!(
            "The text contains {}, which is often used to exaggerate importance.",
            issues.join(" and ")
        );
        if score == 0 {
            Reason::negative("Sensational Writing Style", description)
        } else {
            Reason::warning("Sensational Writing Style", description)
        }
    });

    SignalResult::new(
        score,
        reason,
        SensationalismDetail {
            caps_words_count,
            caps_percentage: (caps_pct * 100.0).round() / 100.0,
            exclamation_count,
            question_count,
        },
    )
}
