use chrono::NaiveDate;

use crate::text::normalize_whitespace;

/// Formats tried in order once a leading weekday has been dropped.
/// `%B` also accepts abbreviated month names when parsing.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
];

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "mon",
    "tue",
    "tues",
    "wed",
    "thu",
    "thur",
    "thurs",
    "fri",
    "sat",
    "sun",
];

/// Parse a human-written date such as `"Friday, January 5, 2024"`.
///
/// Trailing text after the date (a time of day, a location) is ignored.
/// Returns `None` for empty or unrecognised input.
pub fn parse_free_text_date(input: &str) -> Option<NaiveDate> {
    let normalized = normalize_whitespace(input);
    let tokens: Vec<String> = strip_weekday(normalized.split(' '))
        .map(strip_ordinal)
        .collect();
    if tokens.is_empty() {
        return None;
    }

    // Longest prefix first so "5 January 2024" wins over "5 January".
    (1..=tokens.len().min(4))
        .rev()
        .map(|len| tokens[..len].join(" "))
        .find_map(|candidate| parse_candidate(&candidate))
}

fn parse_candidate(candidate: &str) -> Option<NaiveDate> {
    let candidate = candidate.trim_end_matches([',', '.']);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(candidate, fmt).ok())
}

fn strip_weekday<'a>(mut tokens: impl Iterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    let first = tokens.next().filter(|t| !t.is_empty());
    let keep_first = first.filter(|t| {
        let bare = t.trim_end_matches([',', '.']).to_ascii_lowercase();
        !WEEKDAYS.contains(&bare.as_str())
    });
    keep_first.into_iter().chain(tokens)
}

/// `"5th,"` -> `"5,"`; leaves anything that is not a day ordinal untouched.
fn strip_ordinal(token: &str) -> String {
    let (core, trailing) = match token.strip_suffix(',') {
        Some(core) => (core, ","),
        None => (token, ""),
    };
    let lower = core.to_ascii_lowercase();
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(digits) = lower.strip_suffix(suffix) {
            if !digits.is_empty() && digits.len() <= 2 && digits.bytes().all(|b| b.is_ascii_digit())
            {
                return format!("{digits}{trailing}");
            }
        }
    }
    token.to_string()
}
