use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

use crate::models::{Entity, EntityKind, TemporalParams};

static BEFORE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bbefore\s+(\d{1,2}(?::\d{2})?\s*(?:am|pm)?)\b").expect("invalid pattern")
});

static AFTER_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bafter\s+(\d{1,2}(?::\d{2})?\s*(?:am|pm)?)\b").expect("invalid pattern")
});

/// Month name + day number, e.g. "December 25", "july 4th".
static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{1,2})(?:st|nd|rd|th)?\b",
    )
    .expect("invalid pattern")
});

/// Build temporal parameters from the text and already-extracted entities.
///
/// Days come from the entity list in order of appearance, deduplicated.
/// `excluded_dates` is a best-effort heuristic over month-name + day
/// phrasing and resolves against the current year; treat it as
/// approximate. `time_ranges` is only populated when both bounds are
/// explicit.
pub fn parse(text: &str, entities: &[Entity]) -> TemporalParams {
    parse_with_year(text, entities, Utc::now().date_naive().year())
}

pub(crate) fn parse_with_year(
    text: &str,
    entities: &[Entity],
    reference_year: i32,
) -> TemporalParams {
    let mut params = TemporalParams::default();

    for entity in entities.iter().filter(|e| e.kind == EntityKind::DayOfWeek) {
        if !params.days_of_week.contains(&entity.value) {
            params.days_of_week.push(entity.value.clone());
        }
    }

    params.before_time = BEFORE_TIME
        .captures(text)
        .map(|c| c[1].trim().to_lowercase());
    params.after_time = AFTER_TIME
        .captures(text)
        .map(|c| c[1].trim().to_lowercase());

    params.excluded_dates = excluded_dates(text, reference_year);

    params
}

fn excluded_dates(text: &str, year: i32) -> Vec<NaiveDate> {
    MONTH_DAY
        .captures_iter(text)
        .filter_map(|caps| {
            let month = month_number(&caps[1])?;
            let day: u32 = caps[2].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .collect()
}

fn month_number(name: &str) -> Option<u32> {
    let n = match name.to_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(n)
}
