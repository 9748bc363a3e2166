//! Submission validation, run before the pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::InputError;

pub const MIN_TEXT_CHARS: usize = 10;
pub const MAX_TEXT_CHARS: usize = 50_000;

static DOMAIN_ONLY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.)?[a-z0-9-]+\.[a-z]{2,}(?:\.[a-z]{2,})?/?$")
        .expect("domain-only regex")
});

/// Validate a raw submission and return the trimmed text to analyze.
pub fn validate(raw: &str) -> Result<&str, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(InputError::TooShort {
            min: MIN_TEXT_CHARS,
        });
    }
    if chars > MAX_TEXT_CHARS {
        return Err(InputError::TooLong {
            max: MAX_TEXT_CHARS,
        });
    }
    if DOMAIN_ONLY_RE.is_match(text) {
        return Err(InputError::DomainOnly);
    }
    Ok(text)
}
