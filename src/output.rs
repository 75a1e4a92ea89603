//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::CUSTOM_CATEGORY;
use crate::storage::Swept;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A local script as shown by `list`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScriptEntry {
    /// Script name
    pub name: String,
    /// Full description
    pub description: String,
    /// Category (`custom` for user scripts)
    pub category: String,
}

/// Result of `list`
#[derive(Debug, Serialize)]
pub struct ScriptListResult {
    /// Local scripts, in any order
    pub scripts: Vec<ScriptEntry>,
}

/// Result of `list --remote`
#[derive(Debug, Serialize)]
pub struct RemoteListResult {
    /// Catalog base URL
    pub catalog: String,
    /// Category to script names
    pub categories: BTreeMap<String, Vec<String>>,
}

/// Result of `clean`
#[derive(Debug, Default, Serialize)]
pub struct CleanResult {
    /// Metadata files removed because their script is gone
    pub metadata: Vec<String>,
    /// Environments removed because their script is gone
    pub environments: Vec<String>,
    /// `__pycache__` directories removed
    pub caches: Vec<String>,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

impl ScriptListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    /// Scripts grouped by category: custom first, then alphabetical
    ///
    /// When every script is custom there is a single `Scripts` group.
    #[must_use]
    pub fn groups(&self) -> Vec<(String, Vec<&ScriptEntry>)> {
        let mut by_category: BTreeMap<&str, Vec<&ScriptEntry>> = BTreeMap::new();
        for script in &self.scripts {
            by_category.entry(script.category.as_str()).or_default().push(script);
        }
        for group in by_category.values_mut() {
            group.sort_by(|a, b| a.name.cmp(&b.name));
        }

        let custom = by_category.remove(CUSTOM_CATEGORY);
        if by_category.is_empty() {
            return custom.map(|all| vec![("Scripts".to_string(), all)]).unwrap_or_default();
        }

        let mut groups = Vec::new();
        if let Some(custom) = custom {
            groups.push(("User Scripts".to_string(), custom));
        }
        groups.extend(by_category.into_iter().map(|(category, group)| (title_case(category), group)));
        groups
    }

    fn render_human(&self) {
        let width = self.scripts.iter().map(|s| s.name.len()).max().unwrap_or(0);
        for (index, (title, group)) in self.groups().iter().enumerate() {
            if index > 0 {
                println!();
            }
            if title == "User Scripts" {
                println!("{}", title.magenta().bold());
            } else {
                println!("{}", title.yellow().bold());
            }
            for script in group {
                println!(
                    "  {}  {}",
                    format!("{:width$}", script.name).cyan(),
                    first_line(&script.description)
                );
            }
        }
    }
}

impl RemoteListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.categories.is_empty() {
            println!("The catalog has no scripts.");
            return;
        }
        for (index, (category, names)) in self.categories.iter().enumerate() {
            if index > 0 {
                println!();
            }
            println!("{}", title_case(category).yellow().bold());
            for name in names {
                println!("  {}", name.cyan());
            }
        }
    }
}

impl From<Swept> for CleanResult {
    fn from(swept: Swept) -> Self {
        Self {
            metadata: swept.metadata,
            environments: swept.environments,
            caches: swept.caches,
        }
    }
}

impl CleanResult {
    /// Whether nothing had to be removed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.environments.is_empty() && self.caches.is_empty()
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.is_empty() {
            println!("{} Everything is already cleaned.", "✔".green().bold());
            return;
        }
        let sections = [
            ("Orphan metadata removed", &self.metadata),
            ("Orphan environments removed", &self.environments),
            ("Cache directories removed", &self.caches),
        ];
        for (label, items) in sections {
            if items.is_empty() {
                continue;
            }
            println!("{label}:");
            for item in items {
                println!("   - {item}");
            }
        }
        println!("{} Clean completed.", "✔".green().bold());
    }
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.success {
                    println!("{} {}", "✔".green().bold(), self.message);
                } else {
                    println!("{}", self.message);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// First non-empty line of a description
#[must_use]
pub fn first_line(description: &str) -> &str {
    description.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}

/// Capitalize the first letter of every word (`file-tools` becomes `File-Tools`)
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
