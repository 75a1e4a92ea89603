//! Lexical helpers over Python source
//!
//! Just enough tokenization to tell code from strings and comments.

/// A string literal found in source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    /// Literal contents with escapes processed (unless raw)
    pub value: String,
    /// Byte offset just past the closing quote
    pub end: usize,
}

/// Return `source` with comments removed and string literal contents
/// blanked out (quotes kept, newlines inside strings dropped).
///
/// Statement structure survives, so line-based matching on the result
/// never sees text that lives inside a string or a comment.
#[must_use]
pub fn strip_strings_and_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            },
            quote @ (b'"' | b'\'') => {
                let triple = bytes[i..].starts_with(&[quote, quote, quote]);
                let width = if triple { 3 } else { 1 };
                i += width;
                out.push_str(if quote == b'"' { "\"\"" } else { "''" });
                while i < bytes.len() {
                    if bytes[i] == b'\\' {
                        i += 2;
                        continue;
                    }
                    if triple {
                        if bytes[i..].starts_with(&[quote, quote, quote]) {
                            i += 3;
                            break;
                        }
                    } else if bytes[i] == quote {
                        i += 1;
                        break;
                    } else if bytes[i] == b'\n' {
                        // unterminated single-quoted string: stop at end of line
                        break;
                    }
                    i += 1;
                }
            },
            _ => match source.get(i..).and_then(|rest| rest.chars().next()) {
                Some(ch) => {
                    out.push(ch);
                    i += ch.len_utf8();
                },
                None => i += 1,
            },
        }
    }

    out
}

/// Read the string literal starting at `start` (prefix letters allowed)
///
/// Returns `None` if no string literal starts there, or if it is a bytes
/// or f-string (neither can be a docstring).
#[must_use]
pub fn read_string_literal(source: &str, start: usize) -> Option<StringLiteral> {
    let bytes = source.as_bytes();
    let mut i = start;
    let mut raw = false;

    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        match bytes[i].to_ascii_lowercase() {
            b'r' => raw = true,
            b'u' => {},
            _ => return None,
        }
        i += 1;
        if i - start > 2 {
            return None;
        }
    }

    let quote = *bytes.get(i)?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let triple = bytes[i..].starts_with(&[quote, quote, quote]);
    i += if triple { 3 } else { 1 };
    let body_start = i;

    loop {
        if i >= bytes.len() {
            return None;
        }
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if triple && bytes[i..].starts_with(&[quote, quote, quote]) {
            let body = &source[body_start..i];
            return Some(StringLiteral {
                value: if raw { body.to_string() } else { unescape(body) },
                end: i + 3,
            });
        }
        if !triple && bytes[i] == quote {
            let body = &source[body_start..i];
            return Some(StringLiteral {
                value: if raw { body.to_string() } else { unescape(body) },
                end: i + 1,
            });
        }
        if !triple && bytes[i] == b'\n' {
            return None;
        }
        i += 1;
    }
}

/// Skip whitespace, newlines and comments from `start`
#[must_use]
pub fn skip_trivia(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' | b'\x0c' => i += 1,
            b'\\' if bytes.get(i + 1) == Some(&b'\n') => i += 2,
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            },
            _ => break,
        }
    }
    i
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('\n') | None => {},
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
        }
    }
    out
}
