use std::sync::LazyLock;

use regex::Regex;

use crate::models::CapacityParams;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("invalid capacity pattern"))
        .collect()
}

/// Upper-bound phrasings, first match wins.
static MAX_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\bno more than (\d+)\b",
        r"(?i)\bmaximum(?: of)? (\d+)\b",
        r"(?i)\bat most (\d+)\b",
        r"(?i)\bup to (\d+)\b",
        r"(?i)\b(\d+) or fewer\b",
    ])
});

/// Lower-bound phrasings, first match wins.
static MIN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\bat least (\d+)\b",
        r"(?i)\bminimum(?: of)? (\d+)\b",
        r"(?i)\bno fewer than (\d+)\b",
        r"(?i)\b(\d+) or more\b",
    ])
});

/// Build capacity parameters from the text.
///
/// The resource label defaults to "games"; "matches" and "practices" are
/// recognized as alternative countable resources.
pub fn parse(text: &str) -> CapacityParams {
    let mut params = CapacityParams::default();
    let lower = text.to_lowercase();

    params.max_count = first_number(&MAX_PATTERNS, text);
    params.min_count = first_number(&MIN_PATTERNS, text);

    params.per_period = if lower.contains("per day") || lower.contains("daily") {
        Some("day".to_string())
    } else if lower.contains("per week") || lower.contains("weekly") {
        Some("week".to_string())
    } else if lower.contains("per month") || lower.contains("monthly") {
        Some("month".to_string())
    } else {
        None
    };

    if lower.contains("practice") {
        params.resource = "practices".to_string();
    } else if lower.contains("match") {
        params.resource = "matches".to_string();
    }

    params
}

fn first_number(patterns: &[Regex], text: &str) -> Option<u32> {
    patterns
        .iter()
        .find_map(|p| p.captures(text))
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_no_more_than_three_per_day() {
        let p = parse("No more than 3 games per day on Field 1");
        assert_eq!(p.max_count, Some(3));
        assert_eq!(p.min_count, None);
        assert_eq!(p.per_period.as_deref(), Some("day"));
        assert_eq!(p.resource, "games");
    }

    #[test]
    fn at_least_sets_minimum() {
        let p = parse("Each team plays at least 10 games");
        assert_eq!(p.min_count, Some(10));
        assert_eq!(p.max_count, None);
    }

    #[test]
    fn both_bounds_can_coexist() {
        let p = parse("at least 1 and at most 4 matches weekly");
        assert_eq!(p.min_count, Some(1));
        assert_eq!(p.max_count, Some(4));
        assert_eq!(p.per_period.as_deref(), Some("week"));
        assert_eq!(p.resource, "matches");
    }

    #[test]
    fn trailing_phrasings_recognized() {
        assert_eq!(parse("2 or fewer games monthly").max_count, Some(2));
        assert_eq!(parse("5 or more games").min_count, Some(5));
    }

    #[test]
    fn maximum_of_variant() {
        let p = parse("a maximum of 2 practices per week");
        assert_eq!(p.max_count, Some(2));
        assert_eq!(p.resource, "practices");
        assert_eq!(p.per_period.as_deref(), Some("week"));
    }

    #[test]
    fn no_counts_found_leaves_bounds_empty() {
        let p = parse("capacity is a concern");
        assert_eq!(p.max_count, None);
        assert_eq!(p.min_count, None);
        assert_eq!(p.per_period, None);
    }
}
