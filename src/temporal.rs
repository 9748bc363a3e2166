//! # Temporal Relevance
//!
//! Extracts calendar dates from text, measures their age against a reference
//! "now", and scores freshness/staleness.
//!
//! Staleness is judged on the *oldest* reference (one old citation among
//! recent ones still warns); freshness credit needs the *newest* reference to
//! be recent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::rules::{first_match, otherwise, Rule};
use crate::signal::{Reason, SignalResult};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

pub const VERY_OLD_DAYS: i64 = 730;
pub const OUTDATED_DAYS: i64 = 365;
pub const FRESH_DAYS: i64 = 7;
pub const RECENT_DAYS: i64 = 30;

const MONTHS: &str = "Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?";

static MONTH_DAY_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTHS})\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b"
    ))
    .expect("month-day-year regex")
});
static DAY_MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTHS})\s+(\d{{4}})\b"
    ))
    .expect("day-month-year regex")
});
static ISO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("iso date regex"));
static SLASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("slash date regex"));
static RELATIVE_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:in|from|since|during)\s+(\d{4})\b").expect("relative year regex")
});
static YEAR_NOUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(20[0-2]\d)\s+(?:report|study|article|news|data|research|survey)\b")
        .expect("year noun regex")
});

/// Which pattern family produced a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePattern {
    /// "December 27, 2024" or "27 Dec 2024".
    FullDate,
    /// "2024-12-27".
    IsoDate,
    /// "12/27/2024" or "27/12/2024".
    SlashDate,
    /// "in 2020", "2019 study": mapped to July 1.
    YearMention,
    /// Externally supplied publication date.
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractedDate {
    pub date: NaiveDate,
    pub pattern: DatePattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedReference {
    pub date: String,
    pub pattern: DatePattern,
    pub age_in_days: i64,
    pub human_age: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalDetail {
    pub dates_found: usize,
    pub dates: Vec<DatedReference>,
    pub oldest_date: Option<NaiveDate>,
    pub newest_date: Option<NaiveDate>,
    /// Age of the newest reference.
    pub age_in_days: Option<i64>,
    pub is_outdated: bool,
    pub is_very_old: bool,
    pub used_hint: bool,
}

fn month_from_name(name: &str) -> Option<u32> {
    let key: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    let m = match key.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(m)
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn mid_year(year: i32) -> Option<NaiveDate> {
    ymd(year, 7, 1)
}

/// `MM/DD/YYYY` when the first field fits a month, otherwise `DD/MM/YYYY`.
/// Ambiguous inputs such as `03/04/2024` always resolve as `MM/DD`.
pub fn resolve_slash_date(first: u32, second: u32, year: i32) -> Option<NaiveDate> {
    if first <= 12 && second <= 31 {
        ymd(year, first, second)
    } else if second <= 12 && first <= 31 {
        ymd(year, second, first)
    } else {
        None
    }
}

/// Extract every date mention in `text`. Families are scanned independently
/// and results are not deduplicated.
pub fn extract_dates(text: &str) -> Vec<ExtractedDate> {
    let mut out = Vec::new();
    let num = |s: &str| s.parse::<u32>().ok();
    let year = |s: &str| s.parse::<i32>().ok();

    for c in MONTH_DAY_YEAR_RE.captures_iter(text) {
        if let (Some(m), Some(d), Some(y)) = (month_from_name(&c[1]), num(&c[2]), year(&c[3])) {
            if let Some(date) = ymd(y, m, d) {
                out.push(ExtractedDate {
                    date,
                    pattern: DatePattern::FullDate,
                });
            }
        }
    }

    for c in DAY_MONTH_YEAR_RE.captures_iter(text) {
        if let (Some(d), Some(m), Some(y)) = (num(&c[1]), month_from_name(&c[2]), year(&c[3])) {
            if let Some(date) = ymd(y, m, d) {
                out.push(ExtractedDate {
                    date,
                    pattern: DatePattern::FullDate,
                });
            }
        }
    }

    for c in ISO_RE.captures_iter(text) {
        if let (Some(y), Some(m), Some(d)) = (year(&c[1]), num(&c[2]), num(&c[3])) {
            if let Some(date) = ymd(y, m, d) {
                out.push(ExtractedDate {
                    date,
                    pattern: DatePattern::IsoDate,
                });
            }
        }
    }

    for c in SLASH_RE.captures_iter(text) {
        if let (Some(a), Some(b), Some(y)) = (num(&c[1]), num(&c[2]), year(&c[3])) {
            if let Some(date) = resolve_slash_date(a, b, y) {
                out.push(ExtractedDate {
                    date,
                    pattern: DatePattern::SlashDate,
                });
            }
        }
    }

    for re in [&*RELATIVE_YEAR_RE, &*YEAR_NOUN_RE] {
        for c in re.captures_iter(text) {
            if let Some(date) = year(&c[1]).and_then(mid_year) {
                out.push(ExtractedDate {
                    date,
                    pattern: DatePattern::YearMention,
                });
            }
        }
    }

    out
}

/// Whole days between `now` and local midnight of `date`, rounded up.
pub fn age_in_days(date: NaiveDate, now: NaiveDateTime) -> i64 {
    const DAY_MS: i64 = 86_400_000;
    let midnight = date.and_time(NaiveTime::MIN);
    let ms = now.signed_duration_since(midnight).num_milliseconds().abs();
    (ms + DAY_MS - 1) / DAY_MS
}

pub fn format_age(days: i64) -> String {
    match days {
        d if d < 1 => "today".to_string(),
        1 => "yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}

/// Parse an externally supplied publication date (RFC 3339, RFC 2822,
/// `YYYY-MM-DD`, or any in-text format understood by `extract_dates`).
pub fn parse_date_hint(hint: &str) -> Option<NaiveDate> {
    let h = hint.trim();
    if h.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(h) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(h) {
        return Some(dt.date_naive());
    }
    if let Some(prefix) = h.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(d);
        }
    }
    extract_dates(h).into_iter().map(|e| e.date).max()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recency {
    VeryOld,
    Outdated,
    Fresh,
    Recent,
    Aging,
}

struct Facts {
    oldest_age: i64,
    newest_age: i64,
}

const RECENCY_TABLE: &[Rule<Facts, (Recency, i32)>] = &[
    Rule {
        name: "very_old",
        when: |f: &Facts| f.oldest_age > VERY_OLD_DAYS,
        then: (Recency::VeryOld, -10),
    },
    Rule {
        name: "outdated",
        when: |f: &Facts| f.oldest_age > OUTDATED_DAYS,
        then: (Recency::Outdated, -5),
    },
    Rule {
        name: "fresh",
        when: |f: &Facts| f.newest_age <= FRESH_DAYS,
        then: (Recency::Fresh, 5),
    },
    Rule {
        name: "recent",
        when: |f: &Facts| f.newest_age <= RECENT_DAYS,
        then: (Recency::Recent, 3),
    },
    Rule {
        name: "aging",
        when: otherwise,
        then: (Recency::Aging, 0),
    },
];

/// Score publication recency. A parsable `hint` replaces in-text extraction.
pub fn analyze(text: &str, hint: Option<&str>, now: NaiveDateTime) -> SignalResult<TemporalDetail> {
    let hinted = hint.and_then(parse_date_hint);
    let mut extracted = match hinted {
        Some(date) => vec![ExtractedDate {
            date,
            pattern: DatePattern::Hint,
        }],
        None => extract_dates(text),
    };

    if extracted.is_empty() {
        return SignalResult::new(
            0,
            Some(Reason::info(
                "No Publication Date Found",
                "No dates were detected in the content. Consider checking when this was originally published.",
            )),
            TemporalDetail {
                dates_found: 0,
                dates: Vec::new(),
                oldest_date: None,
                newest_date: None,
                age_in_days: None,
                is_outdated: false,
                is_very_old: false,
                used_hint: false,
            },
        );
    }

    // Stable sort keeps extraction order among equal dates.
    extracted.sort_by_key(|e| e.date);
    let oldest = extracted[0].date;
    let newest = extracted[extracted.len() - 1].date;
    let oldest_age = age_in_days(oldest, now);
    let newest_age = age_in_days(newest, now);

    let facts = Facts {
        oldest_age,
        newest_age,
    };
    let (recency, score) = first_match(RECENCY_TABLE, &facts)
        .map(|r| r.then)
        .unwrap_or((Recency::Aging, 0));

    let reason = match recency {
        Recency::VeryOld => Reason::warning(
            "Outdated Content Detected",
            format!(
                "This content references information from {}. Verify if the information is still current and relevant.",
                format_age(oldest_age)
            ),
        ),
        Recency::Outdated => Reason::warning(
            "Older Content",
            format!(
                "This content appears to be from {}. Check if more recent information is available.",
                format_age(oldest_age)
            ),
        ),
        Recency::Fresh => Reason::positive(
            "Recent Publication",
            format!(
                "This content appears to be from {}, suggesting it contains current information.",
                format_age(newest_age)
            ),
        ),
        Recency::Recent => Reason::positive(
            "Recent Content",
            format!(
                "Published approximately {}. The information should be relatively current.",
                format_age(newest_age)
            ),
        ),
        Recency::Aging => Reason::info(
            "Content Age",
            format!(
                "This content appears to be from {}. Consider whether the topic requires more recent updates.",
                format_age(newest_age)
            ),
        ),
    };

    let dates = extracted
        .iter()
        .map(|e| {
            let age = age_in_days(e.date, now);
            DatedReference {
                date: e.date.format("%Y-%m-%d").to_string(),
                pattern: e.pattern,
                age_in_days: age,
                human_age: format_age(age),
            }
        })
        .collect();

    SignalResult::new(
        score,
        Some(reason),
        TemporalDetail {
            dates_found: extracted.len(),
            dates,
            oldest_date: Some(oldest),
            newest_date: Some(newest),
            age_in_days: Some(newest_age),
            is_outdated: recency == Recency::Outdated,
            is_very_old: recency == Recency::VeryOld,
            used_hint: hinted.is_some(),
        },
    )
}
