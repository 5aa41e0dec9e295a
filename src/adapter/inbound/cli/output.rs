//! Terminal output for CLI handlers.
//!
//! Three modes. Human output uses colored markers and aligned fields; quiet
//! keeps only warnings, errors and command results; JSON writes one
//! `{"type": ..., "payload": ...}` object per line so runs can be scripted.

use std::fmt::Display;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::{const_rwlock, RwLock};
use serde::Serialize;
use serde_json::{json, Value};

/// Global CLI flags that shape output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }

    const fn mode(self) -> Mode {
        if self.json {
            Mode::Json
        } else if self.quiet {
            Mode::Quiet
        } else {
            Mode::Human
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Human,
    Quiet,
    Json,
}

static SETTINGS: RwLock<OutputConfig> = const_rwlock(OutputConfig::new(false, false, 0));

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *SETTINGS.write() = config;
}

fn mode() -> Mode {
    SETTINGS.read().mode()
}

#[must_use]
pub fn is_json() -> bool {
    mode() == Mode::Json
}

/// How many times `-v` was given.
#[must_use]
pub fn verbosity() -> u8 {
    SETTINGS.read().verbose
}

fn json_line(kind: &str, payload: Value) -> String {
    json!({ "type": kind, "payload": payload }).to_string()
}

/// Regular output: a JSON line, the human rendering, or nothing when quiet.
fn regular(kind: &str, payload: Value, human: impl FnOnce()) {
    match mode() {
        Mode::Json => println!("{}", json_line(kind, payload)),
        Mode::Human => human(),
        Mode::Quiet => {}
    }
}

/// Print the application name and version.
pub fn header(version: &str) {
    regular("header", json!({ "app": "bulkpay", "version": version }), || {
        println!("{} {}", "bulkpay".bold(), version.dimmed());
        println!();
    });
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    regular("field", json!({ "label": label, "value": &value }), || {
        println!("  {:<14} {}", label.dimmed(), value);
    });
}

pub fn success(message: &str) {
    regular("success", json!({ "message": message }), || {
        println!("  {} {}", "✓".green(), message);
    });
}

pub fn section(title: &str) {
    regular("section", json!({ "title": title }), || {
        println!();
        println!("{}", title.bold());
    });
}

/// Print a warning, quiet mode included.
pub fn warning(message: &str) {
    match mode() {
        Mode::Json => println!("{}", json_line("warning", json!({ "message": message }))),
        Mode::Human | Mode::Quiet => println!("  {} {}", "⚠".yellow(), message),
    }
}

/// Print an error to stderr, quiet mode included.
pub fn error(message: &str) {
    match mode() {
        Mode::Json => eprintln!("{}", json_line("error", json!({ "message": message }))),
        Mode::Human | Mode::Quiet => eprintln!("  {} {}", "×".red(), message),
    }
}

/// Print a command result.
///
/// In JSON mode the value becomes the payload of a `kind` line; otherwise it
/// is pretty-printed. Results are printed even in quiet mode.
pub fn result<T: Serialize>(kind: &str, value: &T) -> crate::error::Result<()> {
    let value = serde_json::to_value(value)?;
    if is_json() {
        println!("{}", json_line(kind, value));
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

/// Print a rendered table, indented. Human mode only.
pub fn table(rendered: &str) {
    if mode() != Mode::Human {
        return;
    }
    for line in rendered.lines() {
        println!("  {line}");
    }
}

/// Progress bar over `total` steps; hidden outside human mode.
pub fn progress(total: u64, message: &str) -> ProgressBar {
    if mode() != Mode::Human {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template("  {msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = ProgressBar::new(total).with_style(style);
    bar.set_message(message.to_string());
    bar
}

fn styled(value: impl Display, paint: impl FnOnce(&str) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        paint(&value)
    }
}

pub fn positive(value: impl Display) -> String {
    styled(value, |v| v.green().to_string())
}

pub fn negative(value: impl Display) -> String {
    styled(value, |v| v.red().to_string())
}

pub fn muted(value: impl Display) -> String {
    styled(value, |v| v.dimmed().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_wins_over_quiet() {
        assert_eq!(OutputConfig::new(true, true, 0).mode(), Mode::Json);
        assert_eq!(OutputConfig::new(false, true, 0).mode(), Mode::Quiet);
        assert_eq!(OutputConfig::default().mode(), Mode::Human);
    }

    #[test]
    fn json_lines_wrap_payload_with_kind() {
        let line: Value = serde_json::from_str(&json_line("field", json!({ "label": "x" }))).unwrap();

        assert_eq!(line, json!({ "type": "field", "payload": { "label": "x" } }));
    }
}
