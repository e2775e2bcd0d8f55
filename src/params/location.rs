use std::sync::LazyLock;

use regex::Regex;

use crate::models::LocationParams;

static HOME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bhome\b").expect("invalid pattern"));
static AWAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\baway\b").expect("invalid pattern"));

/// Build location parameters from the text. Venue names themselves are
/// carried in the entity list, not here.
pub fn parse(text: &str) -> LocationParams {
    LocationParams {
        home_venue_required: HOME.is_match(text),
        away_venue_required: AWAY.is_match(text),
    }
}
