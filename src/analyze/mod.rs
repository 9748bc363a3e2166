// src/analyze/mod.rs
//! Lexical & stylistic analysis: emotional tone (0–25), sensationalism (0–20)
//! and evidence quality (0–25). The three subscores are independent.

pub mod emotional;
pub mod evidence;
pub mod sensationalism;

use serde::Serialize;

use crate::config::ReferenceLists;
use crate::signal::SignalResult;

pub use emotional::{EmotionalDetail, EmotionalToneAnalyzer};
pub use evidence::{EvidenceAnalyzer, EvidenceDetail, EvidenceQuality};
pub use sensationalism::SensationalismDetail;

/// Upper bound of the combined lexical contribution.
pub const MAX_LEXICAL_SCORE: i32 =
    emotional::MAX_SCORE + sensationalism::MAX_SCORE + evidence::MAX_SCORE;

/// The three lexical signals for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexicalReport {
    pub emotional: SignalResult<EmotionalDetail>,
    pub sensationalism: SignalResult<SensationalismDetail>,
    pub evidence: SignalResult<EvidenceDetail>,
}

impl LexicalReport {
    pub fn total(&self) -> i32 {
        self.emotional.score + self.sensationalism.score + self.evidence.score
    }
}

/// Compiled lexical analyzer; build once from `ReferenceLists` and reuse.
#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
    emotional: EmotionalToneAnalyzer,
    evidence: EvidenceAnalyzer,
}

impl LexicalAnalyzer {
    pub fn new(lists: &ReferenceLists) -> Self {
        Self {
            emotional: EmotionalToneAnalyzer::new(lists),
            evidence: EvidenceAnalyzer::new(lists),
        }
    }

    pub fn analyze(&self, text: &str) -> LexicalReport {
        LexicalReport {
            emotional: self.emotional.analyze(text),
            sensationalism: sensationalism::analyze(text),
            evidence: self.evidence.analyze(text),
        }
    }
}
