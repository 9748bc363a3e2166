//! Error types shared across the crate.
//!
//! Analyzers never fail; only input validation, the evaluator entry point and
//! the fact-check transport have error enums.

use thiserror::Error;

/// Submission rejected before any analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please provide text or a URL to analyze")]
    Empty,
    #[error("Text is too short for meaningful analysis (minimum {min} characters)")]
    TooShort { min: usize },
    #[error("Text is too long (maximum {max} characters)")]
    TooLong { max: usize },
    #[error("Only a domain was provided; paste the article text or a full article URL")]
    DomainOnly,
}

impl InputError {
    /// Stable machine-readable code for HTTP bodies.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::Empty => "empty_input",
            InputError::TooShort { .. } => "too_short",
            InputError::TooLong { .. } => "too_long",
            InputError::DomainOnly => "domain_only",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluateError {
    #[error("nothing to evaluate: text is empty")]
    EmptyText,
}

/// Transport-level failure of a single fact-check query.
/// The correlator downgrades every variant to a skipped query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactCheckError {
    #[error("fact-check API key is not configured")]
    MissingApiKey,
    #[error("fact-check API returned HTTP {0}")]
    Http(u16),
    #[error("fact-check request failed: {0}")]
    Network(String),
    #[error("fact-check request timed out")]
    Timeout,
    #[error("fact-check response was malformed: {0}")]
    Malformed(String),
}

impl FactCheckError {
    /// Label used for the `outcome` metric dimension.
    pub fn label(&self) -> &'static str {
        match self {
            FactCheckError::MissingApiKey => "missing_key",
            FactCheckError::Http(_) => "http_error",
            FactCheckError::Network(_) => "network_error",
            FactCheckError::Timeout => "timeout",
            FactCheckError::Malformed(_) => "malformed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_limits() {
        assert_eq!(
            InputError::TooShort { min: 10 }.to_string(),
            "Text is too short for meaningful analysis (minimum 10 characters)"
        );
        assert_eq!(FactCheckError::Http(403).to_string(), "fact-check API returned HTTP 403");
        assert_eq!(FactCheckError::Timeout.label(), "timeout");
    }
}
