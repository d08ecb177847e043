//! Lenient parser for the `{key: value, key.sub: value}` strings clients upload.
//!
//! Uploaded strings come from many client builds and are frequently malformed, so the
//! parser never fails: anything it cannot read is dropped and the rest is kept.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl ConfigValue {
    /// `true`/`false` in any case, then all-ASCII-digit integers, otherwise text.
    pub fn coerce(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            // Digit strings wider than i64 stay text.
            if let Ok(v) = raw.parse::<i64>() {
                return Self::Int(v);
            }
        }
        Self::Text(raw.to_string())
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

pub type ParsedConfig = HashMap<String, ConfigValue>;

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn opener_closer(ch: char) -> Option<char> {
    match ch {
        '[' => Some(']'),
        '(' => Some(')'),
        '{' => Some('}'),
        _ => None,
    }
}

/// A newline directly followed (after blank space) by `:` still belongs to the key before it.
fn newline_splits(rest: &str) -> bool {
    !rest.trim_start().starts_with(':')
}

fn split_plain<'a>(body: &'a str, out: &mut Vec<&'a str>) {
    let mut start = 0usize;
    for (idx, ch) in body.char_indices() {
        if ch == ',' || (ch == '\n' && newline_splits(&body[idx + 1..])) {
            out.push(&body[start..idx]);
            start = idx + 1;
        }
    }
    out.push(&body[start..]);
}

/// Splits on `,` and `\n` outside of a single level of brackets. A bracket that never
/// closes is not treated as nesting: the text from its segment on is split plainly.
fn split_segments(body: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut closer: Option<char> = None;
    let mut start = 0usize;

    for (idx, ch) in body.char_indices() {
        match closer {
            Some(c) => {
                if ch == c {
                    closer = None;
                }
            }
            None => {
                if ch == ',' || (ch == '\n' && newline_splits(&body[idx + 1..])) {
                    out.push(&body[start..idx]);
                    start = idx + 1;
                } else if let Some(c) = opener_closer(ch) {
                    closer = Some(c);
                }
            }
        }
    }

    if closer.is_some() {
        split_plain(&body[start..], &mut out);
    } else {
        out.push(&body[start..]);
    }
    out
}

fn trailing_word_start(s: &str) -> usize {
    let mut start = s.len();
    for (idx, ch) in s.char_indices().rev() {
        if !is_word_char(ch) {
            break;
        }
        start = idx;
    }
    start
}

/// The key sitting right before a colon: `word` or `word.word`.
fn trailing_key(head: &str) -> Option<&str> {
    let word_start = trailing_word_start(head);
    if word_start == head.len() {
        return None;
    }

    if let Some(prefix) = head[..word_start].strip_suffix('.') {
        let prefix_start = trailing_word_start(prefix);
        if prefix_start < prefix.len() {
            return Some(&head[prefix_start..]);
        }
    }
    Some(&head[word_start..])
}

fn split_key_value(segment: &str) -> Option<(&str, &str)> {
    for (idx, _) in segment.match_indices(':') {
        let head = segment[..idx].trim_end();
        if let Some(key) = trailing_key(head) {
            return Some((key, segment[idx + 1..].trim()));
        }
    }
    None
}

/// Parses one uploaded configuration string. Malformed input yields an empty or partial
/// map; a repeated key keeps its last value.
pub fn parse_configuration(raw: &str) -> ParsedConfig {
    let body = raw.trim_matches(|c: char| c == '{' || c == '}' || c.is_whitespace());
    let mut out = ParsedConfig::new();
    if body.is_empty() {
        return out;
    }

    for segment in split_segments(body) {
        let Some((key, value)) = split_key_value(segment) else {
            continue;
        };
        out.insert(key.to_string(), ConfigValue::coerce(value));
    }
    out
}

/// Missing keys read as "not supported".
pub fn is_supported(parsed: &ParsedConfig, capability: &str) -> bool {
    parsed.get(capability).is_some_and(ConfigValue::is_true)
}
