//! Console messages and confirmation prompts
//!
//! Everything the user is meant to read goes through here, never through
//! the logger.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Print `Error: <msg>.` with an optional hint, to stderr
pub fn error(msg: impl Display, hint: Option<&str>) {
    eprintln!("{} {msg}.{}", "Error:".red().bold(), suffix(hint));
}

/// Print `Warning: <msg>.` with an optional hint
pub fn warning(msg: impl Display, hint: Option<&str>) {
    println!("{} {msg}.{}", "Warning:".yellow().bold(), suffix(hint));
}

/// Print a success line
pub fn success(msg: impl Display) {
    println!("{} {msg}", "✔".green().bold());
}

/// Print a progress/info line
pub fn step(msg: impl Display) {
    println!("{} {msg}", "→".cyan());
}

/// Print an indented item line
pub fn item(msg: impl Display) {
    println!("   - {msg}");
}

fn suffix(hint: Option<&str>) -> String {
    hint.map(|h| format!(" {h}")).unwrap_or_default()
}

/// Ask a yes/no question, defaulting to no
///
/// `assume_yes` answers without prompting. End of input counts as no.
pub fn confirm(prompt: &str, assume_yes: bool) -> io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = io::stdin();
    confirm_with(prompt, &mut stdin.lock(), &mut io::stderr())
}

fn confirm_with(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "{} {prompt} (y/N): ", "?".yellow().bold())?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
