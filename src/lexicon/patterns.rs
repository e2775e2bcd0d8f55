use std::sync::LazyLock;

use regex::Regex;

use crate::models::EntityKind;

/// A compiled lexical pattern with the entity kind it produces.
pub(crate) struct LexicalPattern {
    pub regex: Regex,
    pub kind: EntityKind,
    pub confidence: f32,
}

fn pattern(re: &str, kind: EntityKind, confidence: f32) -> LexicalPattern {
    LexicalPattern {
        regex: Regex::new(re).expect("invalid lexical pattern"),
        kind,
        confidence,
    }
}

/// Day names; plural forms are normalized to singular via capture group 1.
pub(crate) static DAY_OF_WEEK: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)s?\b",
        EntityKind::DayOfWeek,
        0.95,
    )
});

/// Clock times: "7:30 PM", "19:30", "8 AM".
pub(crate) static CLOCK_TIME: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"(?i)\b\d{1,2}:\d{2}\s*(?:am|pm)?\b|\b\d{1,2}\s*(?:am|pm)\b",
        EntityKind::Time,
        0.90,
    )
});

/// Durations: "90 minutes", "2 hrs".
pub(crate) static DURATION: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"(?i)\b\d+\s*(?:minutes?|mins?|hours?|hrs?)\b",
        EntityKind::Duration,
        0.85,
    )
});

/// Capacity/quantifier phrases. Numbers found adjacent to one of these
/// spans get boosted confidence.
pub(crate) static CAPACITY_INDICATOR: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:no more than|no fewer than|no less than|at most|at least|maximum(?: of)?|minimum(?: of)?|up to|exceed(?:s|ed)?|limit(?:ed)?|cap(?:ped)?(?: at)?)\b",
        EntityKind::CapacityIndicator,
        0.85,
    )
});

/// Recurring-period and day-part phrases.
pub(crate) static TIME_PERIOD: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:per day|per week|per month|daily|weekly|monthly|mornings?|afternoons?|evenings?|weekends?|weeknights?)\b",
        EntityKind::TimePeriod,
        0.85,
    )
});

/// Venue nouns with an optional trailing numeral ("Field 1", "Court 3").
pub(crate) static VENUE: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:field|court|stadium|arena|gym(?:nasium)?|pitch|rink|diamond)(?:\s+\d+)?\b",
        EntityKind::Venue,
        0.90,
    )
});

/// Personnel and supervision phrases.
pub(crate) static PERSONNEL: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:referees?|umpires?|coach(?:es)?|officials?|supervisors?|volunteers?|chaperones?|staff|adult supervision)\b",
        EntityKind::Personnel,
        0.85,
    )
});

/// Requirement phrases.
pub(crate) static REQUIREMENT: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:requires?|required|requirement|mandatory|obligatory|necessary)\b",
        EntityKind::Requirement,
        0.85,
    )
});

/// Organizational / competition-level phrases.
pub(crate) static ORGANIZATION: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:youth league|high school|middle school|elementary school|college|university|varsity|junior varsity|recreational league|rec league|club)\b",
        EntityKind::Organization,
        0.80,
    )
});

/// Bare integers. Confidence is decided at extraction time (capacity
/// adjacency boost).
pub(crate) static NUMBER: LazyLock<LexicalPattern> =
    LazyLock::new(|| pattern(r"\b\d+\b", EntityKind::Number, 0.85));

/// "Team X" and "X Team" shapes. Case-sensitive: team names are
/// capitalized surface forms.
pub(crate) static TEAM_LABELED: LazyLock<LexicalPattern> = LazyLock::new(|| {
    pattern(
        r"\bTeam\s+[A-Z][\w-]*\b|\b[A-Z][a-z]+\s+Team\b",
        EntityKind::Team,
        0.80,
    )
});

/// Mascot-style capitalized plural nouns ("Eagles", "The Tigers").
/// Filtered against day-of-week spans and `MASCOT_STOPWORDS` at
/// extraction time.
pub(crate) static TEAM_MASCOT: LazyLock<LexicalPattern> =
    LazyLock::new(|| pattern(r"\b(?:The\s+)?[A-Z][a-z]+s\b", EntityKind::Team, 0.75));

/// Capitalized plurals that are scheduling vocabulary, not team names.
pub(crate) const MASCOT_STOPWORDS: &[&str] = &[
    "Teams",
    "Games",
    "Matches",
    "Players",
    "Coaches",
    "Referees",
    "Officials",
    "Fields",
    "Courts",
    "Venues",
    "Days",
    "Weeks",
    "Months",
    "Hours",
    "Minutes",
    "Mornings",
    "Afternoons",
    "Evenings",
    "Weekends",
    "Leagues",
    "Seasons",
    "Practices",
    "Schedules",
];
