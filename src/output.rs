//! Terminal output helpers.
//!
//! The reports are fixed-width, human-readable banners and per-item lines,
//! not a machine-parsed contract. Styling respects console's own color
//! detection (NO_COLOR, non-tty).

use console::style;

/// Print a section banner: blank line, rule, title, rule.
///
/// Example:
/// ```text
/// ========================================================================================
/// AWS SECRETS MANAGER CREATION
/// ========================================================================================
/// ```
pub fn banner(title: &str, width: usize) {
    println!();
    rule(width);
    println!("{}", style(title).bold());
    rule(width);
    println!();
}

/// Print a horizontal rule of `=` characters.
pub fn rule(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Per-item line for a created secret.
///
/// Example: `[CREATE] socialclub/aws/role-arn`
pub fn created(name: &str) {
    println!("{} {}", style("[CREATE]").green(), name);
}

/// Per-item line for an updated secret.
///
/// Example: `[UPDATE] socialclub/aws/role-arn`
pub fn updated(name: &str) {
    println!("{} {}", style("[UPDATE]").cyan(), name);
}

/// Per-item line for a failed secret, with the store's error message.
///
/// Example: `[FAILED] socialclub/aws/role-arn - access denied`
pub fn failed(name: &str, message: &str) {
    println!("{} {} - {}", style("[FAILED]").red(), name, message);
}

/// Numbered listing row with a right-aligned status tag.
///
/// Example: `   1. socialclub/aws/role-arn                             [OK]`
pub fn listing_row(index: usize, name: &str, status: &str) {
    println!("  {:2}. {:<50} [{}]", index, name, status);
}

/// Key-value summary line.
///
/// Example: `  Created: 3`
pub fn kv(label: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", label, style(value.to_string()).bold());
}

/// Final success line (green).
pub fn success(msg: &str) {
    println!("{}", style(msg).green().bold());
}

/// Final warning line (yellow).
pub fn warn(msg: &str) {
    println!("{}", style(msg).yellow().bold());
}

/// Follow-up hint line.
pub fn hint(msg: &str) {
    println!("{}", style(msg).dim());
}

/// Error line to stderr (red), used by the top-level handlers.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}
