//! Import scanning
//!
//! A single pass over the script's statements collecting the top-level
//! packages it imports, minus the standard library.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::source::strip_strings_and_comments;
use super::stdlib::is_stdlib_module;
use crate::core::models::Dependency;

static IMPORT_STMT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^import\s+(.+)$").expect("static regex IMPORT_STMT"));

static FROM_STMT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^from\s+([A-Za-z_][\w.]*|\.+[\w.]*)\s+import\b").expect("static regex FROM_STMT")
});

static CLAUSE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:else|try|finally|(?:if|elif|while|for|with|except|def|class|async)\b[^:]*)\s*:\s*",
    )
    .expect("static regex CLAUSE_HEADER")
});

static IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").expect("static regex IDENT"));

/// Third-party top-level packages imported by a script, sorted and unpinned
#[must_use]
pub fn extract_dependencies(source: &str) -> Vec<Dependency> {
    imported_packages(source)
        .into_iter()
        .filter(|name| !is_stdlib_module(name))
        .map(Dependency::unpinned)
        .collect()
}

/// Every top-level package imported by a script (standard library included)
#[must_use]
pub fn imported_packages(source: &str) -> BTreeSet<String> {
    let code = strip_strings_and_comments(source);
    let mut packages = BTreeSet::new();

    for statement in logical_lines(&code).iter().flat_map(|line| line.split(';')) {
        let statement = strip_clause_headers(statement.trim());

        if let Some(caps) = FROM_STMT.captures(statement) {
            let module = &caps[1];
            // relative imports refer to the script's own package
            if !module.starts_with('.') {
                push_top_level(&mut packages, module);
            }
            continue;
        }

        if let Some(caps) = IMPORT_STMT.captures(statement) {
            for alias in caps[1].split(',') {
                let module = alias.split_whitespace().next().unwrap_or_default();
                let module = module.trim_matches(|c| c == '(' || c == ')');
                push_top_level(&mut packages, module);
            }
        }
    }

    packages
}

/// Join backslash-continued physical lines
fn logical_lines(code: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for line in code.lines() {
        if let Some(continued) = line.strip_suffix('\\') {
            current.push_str(continued);
            current.push(' ');
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Body of a one-line compound statement (`try: import yaml` gives
/// `import yaml`)
fn strip_clause_headers(mut statement: &str) -> &str {
    while let Some(header) = CLAUSE_HEADER.find(statement) {
        if header.end() == 0 {
            break;
        }
        statement = &statement[header.end()..];
    }
    statement
}

fn push_top_level(packages: &mut BTreeSet<String>, module: &str) {
    let top = module.split('.').next().unwrap_or_default();
    if IDENT.is_match(top) {
        packages.insert(top.to_string());
    }
}
