use std::sync::LazyLock;

use regex::Regex;

use crate::models::RestParams;

static DAYS_BETWEEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s+days?\s+(?:(?:of\s+)?rest\s+)?between\b").expect("invalid pattern")
});
static HOURS_BETWEEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s+hours?\s+(?:(?:of\s+)?rest\s+)?between\b").expect("invalid pattern")
});
static DAYS_REST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s+days?\s+(?:of\s+)?rest\b").expect("invalid pattern")
});
static HOURS_REST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s+hours?\s+(?:of\s+)?rest\b").expect("invalid pattern")
});

/// Build rest parameters from the text. `between_games` stays true — rest
/// constraints are gaps between fixtures unless phrased otherwise.
pub fn parse(text: &str) -> RestParams {
    let mut params = RestParams::default();

    params.min_days = capture_number(&DAYS_BETWEEN, text).or_else(|| capture_number(&DAYS_REST, text));
    params.min_hours =
        capture_number(&HOURS_BETWEEN, text).or_else(|| capture_number(&HOURS_REST, text));

    params
}

fn capture_number(pattern: &Regex, text: &str) -> Option<u32> {
    pattern.captures(text).and_then(|caps| caps[1].parse().ok())
}
