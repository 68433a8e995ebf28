//! `.properties` bundle parsing.
//!
//! Supported syntax:
//! - `#` and `!` comment lines, blank lines
//! - `key=value`, `key: value` and `key value`
//! - a trailing odd backslash continues the logical line; leading whitespace
//!   of the continuation is dropped
//! - escapes `\t \n \r \f \\ \uXXXX`; any other escaped character stands for
//!   itself, which is how `\=`, `\:` and `\ ` put separators into keys
//!
//! A repeated key keeps its first position and its last value.

use indexmap::IndexMap;
use parlance_core::SourceError;

pub fn parse_properties(bundle: &str, text: &str) -> Result<IndexMap<String, String>, SourceError> {
    let mut messages = IndexMap::new();
    let mut lines = text.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line_number = index + 1;
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(bundle, line_number, raw_key)?;
        let value = unescape(bundle, line_number, raw_value)?;
        messages.insert(key, value);
    }

    Ok(messages)
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn is_separator_space(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

/// Splits a logical line at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_separator_space(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_separator_space);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_separator_space);
    }
    (key, rest)
}

fn unescape(bundle: &str, line: usize, raw: &str) -> Result<String, SourceError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| SourceError::Malformed {
                        bundle: bundle.to_string(),
                        line,
                        reason: format!("invalid unicode escape '\\u{hex}'"),
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
