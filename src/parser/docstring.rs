//! Docstring extraction
//!
//! The description of a script is the docstring of its top-level `main`
//! function, or the module docstring when `main` has none.

use std::sync::LazyLock;

use regex::Regex;

use super::source::{read_string_literal, skip_trivia, strip_strings_and_comments};

static MAIN_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:async[ \t]+)?def[ \t]+main[ \t]*\(").expect("static regex MAIN_DEF")
});

/// Description of a script, or an empty string if it documents nothing
#[must_use]
pub fn extract_description(source: &str) -> String {
    main_docstring(source)
        .or_else(|| module_docstring(source))
        .map(|doc| clean_doc(&doc))
        .unwrap_or_default()
}

/// Whether the script defines a top-level `main` function
#[must_use]
pub fn has_entry_point(source: &str) -> bool {
    MAIN_DEF.is_match(&strip_strings_and_comments(source))
}

/// Docstring of the top-level `main` function
fn main_docstring(source: &str) -> Option<String> {
    let open = main_def_open_paren(source)?;
    let body = signature_end(source, open)?;
    let start = skip_trivia(source, body);
    read_string_literal(source, start).map(|lit| lit.value)
}

/// Offset of the `(` of the first `def main` that is real code, not text
/// inside a string literal or a comment
fn main_def_open_paren(source: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = 0;
    for found in MAIN_DEF.find_iter(source) {
        while i < found.start() {
            match bytes[i] {
                b'#' => {
                    while i < bytes.len() && bytes[i] != b'\n' {
                        i += 1;
                    }
                },
                b'\'' | b'"' => i = read_string_literal(source, i).map_or(i + 1, |lit| lit.end),
                _ => i += 1,
            }
        }
        if i == found.start() {
            // `(` is the last byte of the match
            return Some(found.end() - 1);
        }
    }
    None
}

/// Docstring of the module (first statement is a string literal)
fn module_docstring(source: &str) -> Option<String> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let start = skip_trivia(source, 0);
    read_string_literal(source, start).map(|lit| lit.value)
}

/// Offset just past the `:` that ends a signature whose `(` is at `open`
fn signature_end(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'\'' | b'"' => {
                i = read_string_literal(source, i)?.end;
                continue;
            },
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            },
            b':' if depth == 0 => return Some(i + 1),
            _ => {},
        }
        i += 1;
    }
    None
}

/// Clean up indentation like Python's `inspect.cleandoc`
#[must_use]
pub fn clean_doc(doc: &str) -> String {
    let expanded = doc.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    cleaned.push(lines[0].trim_start().to_string());
    for line in &lines[1..] {
        let cut = indent_width(line).min(margin);
        let rest = line.char_indices().nth(cut).map_or("", |(at, _)| &line[at..]);
        cleaned.push(rest.trim_end().to_string());
    }

    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }
    while cleaned.first().is_some_and(|l| l.trim().is_empty()) {
        cleaned.remove(0);
    }

    cleaned.join("\n")
}

/// Number of leading whitespace characters
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
