use std::sync::LazyLock;

use regex::Regex;

use crate::models::PreferenceParams;

/// Default weight for a preference with no strength phrasing.
const DEFAULT_WEIGHT: f32 = 0.5;
/// Weight when the preference is emphatic ("strongly prefer").
const STRONG_WEIGHT: f32 = 0.8;
/// Weight when the preference is hedged ("ideally", "if possible").
const WEAK_WEIGHT: f32 = 0.3;

static STRONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:strongly prefer|much rather|really (?:want|prefer)|important)\b")
        .expect("invalid pattern")
});
static WEAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:ideally|if possible|slightly|would be nice|when convenient)\b")
        .expect("invalid pattern")
});

/// Build preference parameters: the full sentence is kept as the soft
/// constraint's description, with a weight scaled by phrasing strength.
pub fn parse(text: &str) -> PreferenceParams {
    let weight = if STRONG.is_match(text) {
        STRONG_WEIGHT
    } else if WEAK.is_match(text) {
        WEAK_WEIGHT
    } else {
        DEFAULT_WEIGHT
    };

    PreferenceParams {
        description: text.trim().to_string(),
        weight,
    }
}
