//! Shared output contract for every analyzer.
//!
//! Each analyzer returns a `SignalResult<D>`: a score contribution, at most one
//! explanatory `Reason`, and an analyzer-specific `detail` used only by the
//! report's breakdown panel (never by aggregation).

use serde::{Deserialize, Serialize};

/// How a signal affected the verdict. Declaration order is the display order
/// of reasons in the final report (`Negative` first, `Positive` last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonType {
    Negative,
    Warning,
    Info,
    Positive,
}

/// A human-readable explanation attached to one signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    #[serde(rename = "type")]
    pub kind: ReasonType,
    pub title: String,
    pub description: String,
}

impl Reason {
    fn new(kind: ReasonType, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }

    /// The signal hurt credibility.
    pub fn negative(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ReasonType::Negative, title, description)
    }

    /// The signal partially hurt credibility.
    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ReasonType::Warning, title, description)
    }

    /// Neutral, informational only.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ReasonType::Info, title, description)
    }

    /// The signal helped credibility.
    pub fn positive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ReasonType::Positive, title, description)
    }
}

/// One independently computed score plus its optional reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult<D> {
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
    pub detail: D,
}

impl<D> SignalResult<D> {
    pub fn new(score: i32, reason: Option<Reason>, detail: D) -> Self {
        Self {
            score,
            reason,
            detail,
        }
    }
}

/// Stable ordering by reason type; ties keep insertion order.
pub fn rank_reasons(mut reasons: Vec<Reason>) -> Vec<Reason> {
    // `sort_by_key` is a stable sort.
    reasons.sort_by_key(|r| r.kind);
    reasons
}
