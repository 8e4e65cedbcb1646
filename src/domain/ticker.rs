//! Ticker token recognition.
//!
//! Small hand-rolled matchers for the handful of token shapes the extractor
//! cares about: the whole-cell ticker pattern `^[A-Z0-9.]{1,N}$`, word-bounded
//! substrings `\b[..]{1,N}\b` with regex word-boundary semantics, and the
//! leading row-number artifact `^\d+\s+`.

use std::collections::HashSet;

/// Character class of a ticker: upper-case ASCII letters, digits and `.`.
pub fn is_ticker_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.'
}

/// True if `token` as a whole is 1..=`max_len` ticker characters.
pub fn is_ticker(token: &str, max_len: usize) -> bool {
    let len = token.chars().count();
    (1..=max_len).contains(&len) && token.chars().all(is_ticker_char)
}

pub fn has_letter(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_alphabetic())
}

/// Drop a leading `digits + whitespace` prefix, e.g. `"8 AMZN"` becomes `"AMZN"`.
///
/// Digits not followed by whitespace are left alone, so `"3M"` and `"8"` are
/// returned unchanged.
pub fn strip_numeric_prefix(cell: &str) -> &str {
    let digits_end = cell
        .char_indices()
        .find(|&(_, c)| !c.is_ascii_digit())
        .map_or(cell.len(), |(i, _)| i);
    if digits_end == 0 {
        return cell;
    }
    let rest = &cell[digits_end..];
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        cell
    } else {
        trimmed
    }
}

/// Word-bounded ticker substrings of `text`, in order of appearance.
pub fn find_ticker_tokens(text: &str, max_len: usize) -> Vec<&str> {
    find_bounded(text, max_len, is_ticker_char)
}

/// Word-bounded runs of upper-case ASCII letters of `text`, in order of appearance.
pub fn find_uppercase_words(text: &str, max_len: usize) -> Vec<&str> {
    find_bounded(text, max_len, |c| c.is_ascii_uppercase())
}

/// Keep the first occurrence of every token.
pub fn dedup_preserving_order<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for token in tokens {
        let token = token.into();
        if seen.insert(token.clone()) {
            unique.push(token);
        }
    }
    unique
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_at(chars: &[(usize, char)], i: usize) -> bool {
    chars.get(i).is_some_and(|&(_, c)| is_word_char(c))
}

fn is_boundary(chars: &[(usize, char)], i: usize) -> bool {
    let before = i > 0 && is_word_at(chars, i - 1);
    before != is_word_at(chars, i)
}

/// Leftmost-first scan equivalent to `\b[class]{1,max_len}\b`: at each start
/// the longest run that also ends on a word boundary wins, and scanning
/// resumes after it.
fn find_bounded(text: &str, max_len: usize, in_class: impl Fn(char) -> bool) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(text.len(), |&(b, _)| b);

    let mut found = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if is_boundary(&chars, i) {
            let run = chars[i..]
                .iter()
                .take(max_len)
                .take_while(|&&(_, c)| in_class(c))
                .count();
            if let Some(len) = (1..=run).rev().find(|&len| is_boundary(&chars, i + len)) {
                found.push(&text[byte_at(i)..byte_at(i + len)]);
                i += len;
                continue;
            }
        }
        i += 1;
    }
    found
}
