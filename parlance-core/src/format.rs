//! Positional template substitution.
//!
//! Patterns reference arguments by index: `"str: {0}, x: {1}"`. A pair of
//! apostrophes produces one literal apostrophe, and text between single
//! apostrophes is copied verbatim, so `'{0}'` renders as `{0}`. A closing
//! brace outside a placeholder is ordinary text.
//!
//! Style suffixes such as `{0,number}` are rejected; there is no rule engine
//! behind the placeholders, only `Display`.

use std::fmt::Display;

use crate::error::FormatError;

/// Substitutes `{n}` placeholders in `pattern` with `args[n]`.
///
/// Unused arguments are allowed. A placeholder pointing past the end of
/// `args`, a malformed placeholder or an unterminated quote is an error.
///
/// A single apostrophe always opens a quoted section, also inside ordinary
/// words: `"Don't delete {0}"` fails with `UnterminatedQuote`. Write
/// `"Don''t delete {0}"` for a literal apostrophe.
pub fn format_positional(pattern: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(pattern.len() + args.len() * 8);
    let mut chars = pattern.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '\'' => {
                if chars.next_if(|&(_, c)| c == '\'').is_some() {
                    out.push('\'');
                    continue;
                }
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    if c == '\'' {
                        if chars.next_if(|&(_, c)| c == '\'').is_some() {
                            out.push('\'');
                            continue;
                        }
                        closed = true;
                        break;
                    }
                    out.push(c);
                }
                if !closed {
                    return Err(FormatError::UnterminatedQuote {
                        pattern: pattern.to_string(),
                        position,
                    });
                }
            }
            '{' => {
                let mut body = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    body.push(c);
                }
                if !closed {
                    return Err(FormatError::UnterminatedPlaceholder {
                        pattern: pattern.to_string(),
                        position,
                    });
                }
                let index = placeholder_index(pattern, &body)?;
                let arg = args.get(index).ok_or_else(|| FormatError::MissingArgument {
                    pattern: pattern.to_string(),
                    index,
                    supplied: args.len(),
                })?;
                out.push_str(&arg.to_string());
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

fn placeholder_index(pattern: &str, body: &str) -> Result<usize, FormatError> {
    let (index, style) = match body.split_once(',') {
        Some((index, style)) => (index.trim(), Some(style.trim())),
        None => (body.trim(), None),
    };

    if let Some(style) = style {
        return Err(FormatError::UnsupportedStyle {
            pattern: pattern.to_string(),
            index: index.to_string(),
            style: style.to_string(),
        });
    }

    if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormatError::InvalidIndex {
            pattern: pattern.to_string(),
            placeholder: body.to_string(),
        });
    }

    index.parse().map_err(|_| FormatError::InvalidIndex {
        pattern: pattern.to_string(),
        placeholder: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_substitution() {
        let result = format_positional("str: {0}, x: {1}", &[&"foo", &42]).unwrap();
        assert_eq!(result, "str: foo, x: 42");
    }

    #[test]
    fn test_placeholders_can_repeat_and_reorder() {
        let result = format_positional("{1} then {0} then {1}", &[&"a", &"b"]).unwrap();
        assert_eq!(result, "b then a then b");
    }

    #[test]
    fn test_whitespace_inside_placeholder() {
        assert_eq!(format_positional("<{ 0 }>", &[&7]).unwrap(), "<7>");
    }

    #[test]
    fn test_quotes() {
        assert_eq!(format_positional("it''s {0}", &[&"here"]).unwrap(), "it's here");
        assert_eq!(format_positional("'{0}' is {0}", &[&"x"]).unwrap(), "{0} is x");
        assert_eq!(format_positional("'it''s' {0}", &[&1]).unwrap(), "it's 1");
    }

    #[test]
    fn test_stray_closing_brace_is_literal() {
        assert_eq!(format_positional("a } b {0}", &[&1]).unwrap(), "a } b 1");
    }

    #[test]
    fn test_unused_arguments_are_allowed() {
        assert_eq!(format_positional("just {0}", &[&1, &2, &3]).unwrap(), "just 1");
    }

    #[test]
    fn test_missing_argument_is_an_error() {
        let err = format_positional("{0} and {2}", &[&"a", &"b"]).unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingArgument {
                pattern: "{0} and {2}".to_string(),
                index: 2,
                supplied: 2,
            }
        );
    }

    #[test]
    fn test_malformed_patterns() {
        assert!(matches!(
            format_positional("broken {0", &[&1]),
            Err(FormatError::UnterminatedPlaceholder { position: 7, .. })
        ));
        assert!(matches!(
            format_positional("{name}", &[&1]),
            Err(FormatError::InvalidIndex { .. })
        ));
        assert!(matches!(
            format_positional("{}", &[&1]),
            Err(FormatError::InvalidIndex { .. })
        ));
        assert!(matches!(
            format_positional("{0,number,integer}", &[&1]),
            Err(FormatError::UnsupportedStyle { .. })
        ));
        assert!(matches!(
            format_positional("'open {0}", &[&1]),
            Err(FormatError::UnterminatedQuote { position: 0, .. })
        ));
    }
}
