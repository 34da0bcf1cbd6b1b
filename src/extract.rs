//! Field extractors shared by the page and detail parsers.
//!
//! Everything in here is a pure function over strings. None of these functions
//! fail: unrecognisable input degrades to a documented default (placeholder
//! artist, `None` date, zero duration).

use crate::types::{ArtistRef, TRACK_ID_PREFIX, UNKNOWN_ARTIST};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Separators between the artist block and the rest of a title, in no
/// particular priority: the leftmost occurrence wins.
const TITLE_SEPARATORS: [&str; 3] = [" - ", " \u{2013} ", " \u{2014} "];

static ARTIST_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:b2b|vs\.?|x|and|feat\.?|ft\.?|with)\s+|[,;]+")
        .expect("artist split pattern is valid")
});

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]").expect("bracket pattern is valid"));

static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("date literal pattern is valid")
});

static TIMESTAMP_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d{1,2}:\d{2}(?::\d{2})?)\]").expect("timestamp pattern is valid")
});

static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Naive date formats tried, in order, after the strict `DD/MM/YYYY` literal.
const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d %Y",
];

/// Date-time formats without an offset, interpreted as UTC.
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Collapse internal whitespace and trim.
pub fn normalize_artist(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize every name, drop empties, and fall back to the placeholder artist.
pub fn ensure_artists<I, S>(artists: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cleaned: Vec<String> = artists
        .into_iter()
        .map(|name| normalize_artist(name.as_ref()))
        .filter(|name| !name.is_empty())
        .collect();

    if cleaned.is_empty() {
        vec![UNKNOWN_ARTIST.to_string()]
    } else {
        cleaned
    }
}

/// The part of a title before the leftmost artist/title separator.
fn artist_block(title: &str) -> &str {
    TITLE_SEPARATORS
        .iter()
        .filter_map(|separator| title.find(separator))
        .filter(|&index| index > 0)
        .min()
        .map_or(title, |index| &title[..index])
}

/// Guess the performing artists from a liveset title.
///
/// `"Armin van Buuren b2b Ferry Corsten - Live @ ASOT"` yields both names.
/// The result is never empty.
pub fn guess_artists_from_title(title: &str) -> Vec<String> {
    let block = artist_block(title);

    let tokens: Vec<String> = ARTIST_SPLIT
        .split(block)
        .map(|token| BRACKETED.replace_all(token, "").trim().to_string())
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        ensure_artists([block])
    } else {
        ensure_artists(tokens)
    }
}

/// Parse a rendered date into `YYYY-MM-DD`.
///
/// A strict `DD/MM/YYYY` literal is read as day/month/year. Anything else goes
/// through a list of common formats. Unparseable input yields `None`.
pub fn parse_date(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).map(format_date);
    }

    parse_general_date(trimmed).map(format_date)
}

/// General date parsers, tried in order after the strict literal.
const DATE_PARSERS: [fn(&str) -> Option<NaiveDate>; 4] = [
    parse_naive_date,
    parse_rfc3339_date,
    parse_rfc2822_date,
    parse_naive_date_time,
];

fn parse_general_date(value: &str) -> Option<NaiveDate> {
    DATE_PARSERS.iter().find_map(|parser| parser(value))
}

fn parse_naive_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_rfc3339_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

fn parse_rfc2822_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

fn parse_naive_date_time(value: &str) -> Option<NaiveDate> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.date())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Convert a `H:MM:SS`, `MM:SS` or `H:MM` timestamp into milliseconds.
///
/// Segments are read right to left as seconds, minutes, hours. Returns 0 for
/// anything that is not all digits.
pub fn timestamp_to_ms(value: &str) -> u64 {
    let parts: Option<Vec<u64>> = value
        .split(':')
        .map(|part| part.trim().parse::<u64>().ok())
        .collect();

    match parts {
        Some(parts) if !parts.is_empty() && parts.len() <= 3 => {
            let seconds = parts
                .iter()
                .rev()
                .zip([1u64, 60, 3600])
                .map(|(part, factor)| part * factor)
                .sum::<u64>();
            seconds * 1000
        }
        _ => 0,
    }
}

/// Duration of a liveset from the last bracketed timestamp in its text.
///
/// Tracklists mark each track's start as `[MM:SS]`/`[H:MM:SS]`; the final
/// marker is taken as the total runtime.
pub fn extract_duration_ms(text: &str) -> u64 {
    TIMESTAMP_MARKER
        .captures_iter(text)
        .last()
        .and_then(|caps| caps.get(1))
        .map_or(0, |m| timestamp_to_ms(m.as_str()))
}

/// Lowercase slug of a name: runs of anything but `[a-z0-9]` become `-`.
pub fn slugify(value: &str) -> String {
    NON_SLUG
        .replace_all(&value.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Artist reference for a name, identified by its slug.
///
/// Names without any slug-able characters get a random identifier.
pub fn artist_ref(name: &str) -> ArtistRef {
    let slug = slugify(name);
    let id = if slug.is_empty() {
        format!("{TRACK_ID_PREFIX}{}", rand::random::<u64>())
    } else {
        slug
    };
    ArtistRef {
        id,
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_artist() {
        assert_eq!(normalize_artist("  Armin   van\tBuuren "), "Armin van Buuren");
        assert_eq!(normalize_artist("   "), "");
    }

    #[test]
    fn test_guess_artists_b2b_and_separator() {
        assert_eq!(
            guess_artists_from_title("Armin van Buuren b2b Ferry Corsten - Live @ ASOT 1000"),
            vec!["Armin van Buuren", "Ferry Corsten"]
        );
    }

    #[test]
    fn test_guess_artists_leftmost_separator_wins() {
        // The en-dash comes first even though " - " is listed first
        assert_eq!(
            guess_artists_from_title("Hardwell \u{2013} Live - Tomorrowland"),
            vec!["Hardwell"]
        );
    }

    #[test]
    fn test_guess_artists_connectors_and_annotations() {
        assert_eq!(
            guess_artists_from_title("Tiësto feat. Karen Overton, Ferry Corsten [Remastered] - Set"),
            vec!["Tiësto", "Karen Overton", "Ferry Corsten"]
        );
        assert_eq!(
            guess_artists_from_title("Above & Beyond VS Gareth Emery"),
            vec!["Above & Beyond", "Gareth Emery"]
        );
    }

    #[test]
    fn test_guess_artists_does_not_split_inside_words() {
        assert_eq!(
            guess_artists_from_title("Maxwell Andersen - Sunrise"),
            vec!["Maxwell Andersen"]
        );
    }

    #[test]
    fn test_guess_artists_never_empty() {
        assert_eq!(guess_artists_from_title(""), vec![UNKNOWN_ARTIST]);
        assert_eq!(guess_artists_from_title("   "), vec![UNKNOWN_ARTIST]);
        assert_eq!(guess_artists_from_title("[Live]"), vec!["[Live]"]);
    }

    #[test]
    fn test_separator_at_start_is_ignored() {
        assert_eq!(guess_artists_from_title(" - Untitled"), vec!["- Untitled"]);
    }

    #[test]
    fn test_parse_date_day_month_year() {
        assert_eq!(parse_date("21/03/2024"), Some("2024-03-21".to_string()));
        assert_eq!(parse_date(" 01/12/2023 "), Some("2023-12-01".to_string()));
    }

    #[test]
    fn test_parse_date_general_formats() {
        assert_eq!(parse_date("2024-03-21"), Some("2024-03-21".to_string()));
        assert_eq!(parse_date("March 21, 2024"), Some("2024-03-21".to_string()));
        assert_eq!(parse_date("Mar 5, 2024"), Some("2024-03-05".to_string()));
        assert_eq!(
            parse_date("2024-03-21T23:30:00+00:00"),
            Some("2024-03-21".to_string())
        );
        assert_eq!(
            parse_date("Thu, 21 Mar 2024 10:00:00 GMT"),
            Some("2024-03-21".to_string())
        );
    }

    #[test]
    fn test_parse_date_rejects_nonsense() {
        assert_eq!(parse_date("2024-13-40"), None);
        assert_eq!(parse_date("31/02/2024"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn test_extract_duration_uses_last_marker() {
        assert_eq!(
            extract_duration_ms("[00:00] intro [30:15] drop ... [01:02:03] outro"),
            3_723_000
        );
        assert_eq!(extract_duration_ms("[58:30] closing track"), 3_510_000);
    }

    #[test]
    fn test_extract_duration_without_marker() {
        assert_eq!(extract_duration_ms("no tracklist available"), 0);
        assert_eq!(extract_duration_ms("[1:2] [abc]"), 0);
        assert_eq!(extract_duration_ms(""), 0);
    }

    #[test]
    fn test_timestamp_to_ms() {
        assert_eq!(timestamp_to_ms("1:30"), 90_000);
        assert_eq!(timestamp_to_ms("2:00:00"), 7_200_000);
        assert_eq!(timestamp_to_ms("x:00"), 0);
    }

    #[test]
    fn test_slugify_and_artist_ref() {
        assert_eq!(slugify("Armin van Buuren"), "armin-van-buuren");
        assert_eq!(slugify("  Above & Beyond!! "), "above-beyond");
        assert_eq!(artist_ref("Armin van Buuren").id, "armin-van-buuren");

        let fallback = artist_ref("ØØØ");
        assert!(fallback.id.starts_with(TRACK_ID_PREFIX));
        assert_eq!(fallback.name, "ØØØ");
    }
}
