//! Decomposes Goodreads titles like "Title: Subtitle (Series, #N)"

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// Contents of a trailing parenthetical: "Series, #3.5", "Series #4", "Series 2", "Series#1"
static SERIES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^#]+?)(?:(?:,\s*#?|\s+#?|#)(?P<number>\d+(?:\.\d+)?))?$").unwrap()
});

/// A book title split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTitle {
    pub title: String,
    /// The input exactly as given
    pub full_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,
    /// Kept as text so "3.5" survives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_number: Option<String>,
}

struct Series {
    name: String,
    number: Option<String>,
}

/// Parse a title into title, subtitle, series name and series number.
///
/// The trailing parenthetical is split off first, then the remainder is
/// split on its first colon. Input that fits neither shape comes back as a
/// trimmed title with every optional part absent.
pub fn parse_title(full_title: &str) -> ParsedTitle {
    let (head, series) = match split_series(full_title) {
        Some((head, series)) => (head, Some(series)),
        None => (full_title, None),
    };

    let (title, subtitle) = split_subtitle(head);
    let (series_name, series_number) = match series {
        Some(series) => (Some(series.name), series.number),
        None => (None, None),
    };

    ParsedTitle {
        title,
        full_title: full_title.to_string(),
        subtitle,
        series_name,
        series_number,
    }
}

fn split_series(full_title: &str) -> Option<(&str, Series)> {
    let (head, inner) = split_trailing_parenthetical(full_title)?;

    // "(Series, #1)" on its own is a title, not a series
    if head.trim().is_empty() {
        return None;
    }

    let caps = SERIES_PATTERN.captures(inner.trim())?;
    let name = caps.name("name")?.as_str().trim().to_string();
    let number = caps.name("number").map(|m| m.as_str().to_string());

    Some((head, Series { name, number }))
}

/// Find the last balanced "(...)" that closes the string.
/// Returns the text before it and the text inside it.
fn split_trailing_parenthetical(s: &str) -> Option<(&str, &str)> {
    let trimmed = s.trim_end();
    if !trimmed.ends_with(')') {
        return None;
    }
    let close = trimmed.len() - 1;

    let mut depth = 0usize;
    for (idx, c) in trimmed.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&trimmed[..idx], &trimmed[idx + 1..close]));
                }
            }
            _ => {}
        }
    }

    None
}

fn split_subtitle(head: &str) -> (String, Option<String>) {
    if let Some((title, subtitle)) = head.split_once(':') {
        let title = title.trim();
        let subtitle = subtitle.trim();
        if !title.is_empty() {
            let subtitle = (!subtitle.is_empty()).then(|| subtitle.to_string());
            return (title.to_string(), subtitle);
        }
    }

    (head.trim().to_string(), None)
}
