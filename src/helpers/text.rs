//! Text helpers shared by the content layer and the pipelines

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Ellipsis appended to pruned text
pub const ELLIPSIS: char = '…';

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Truncate text to at most `length` characters on a word boundary.
///
/// Text that fits is returned unchanged. Otherwise whole words are kept and
/// an ellipsis appended, the ellipsis counting towards `length`. A single
/// word longer than the budget is cut mid-word.
pub fn prune(text: &str, length: usize) -> String {
    if length == 0 {
        return String::new();
    }
    if text.chars().count() <= length {
        return text.to_string();
    }

    let budget = length.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if used == 0 { word_len } else { used + 1 + word_len };
        if needed > budget {
            break;
        }
        if used > 0 {
            out.push(' ');
        }
        out.push_str(word);
        used = needed;
    }

    if used == 0 {
        out = text.chars().take(budget).collect();
    }

    out.push(ELLIPSIS);
    out
}

/// Count words in plain text. CJK ideographs count one each.
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if ('\u{4E00}'..='\u{9FFF}').contains(&c) {
            count += 1;
            in_word = false;
        } else if c.is_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if c != '\'' && c != '-' {
            in_word = false;
        }
    }

    count
}

/// Estimated reading time in whole minutes, never less than one
pub fn time_to_read(words: usize, words_per_minute: usize) -> usize {
    let wpm = words_per_minute.max(1);
    ((words as f64 / wpm as f64).round() as usize).max(1)
}

/// First candidate that is present and not blank
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}
