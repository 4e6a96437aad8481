//! Console output for extraction previews and reconcile results.
//!
//! Writers are taken as parameters so output can be checked in tests; the
//! commands pass locked stdout.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::extract::{ApplyStats, ExtractionPlan};
use crate::reconcile::{AddReport, ReconcilePlan};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const KEY_COLUMN_WIDTH: usize = 40;
const LOCALE_COLUMN_WIDTH: usize = 10;

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".bold().yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".bold().red(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", SUCCESS_MARK.green(), message.green());
}

/// Pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

pub fn print_extraction_preview(plan: &ExtractionPlan) {
    write_extraction_preview(plan, &mut io::stdout().lock());
}

/// Planned replacements grouped by file, followed by key conflicts.
pub fn write_extraction_preview<W: Write>(plan: &ExtractionPlan, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}",
        "Planned replacements (review before source files are rewritten):".bold()
    );

    for file in &plan.files {
        let _ = writeln!(writer, "{} {}", "File:".bold(), file.source.display());
        if let Some(import) = &file.import {
            let _ = writeln!(
                writer,
                "  {} {}  {}",
                "+".green(),
                import.statement.cyan(),
                format!("line {}", import.line).dimmed()
            );
        }
        for replacement in &file.replacements {
            let _ = writeln!(
                writer,
                "  {} -> {}  {}",
                replacement.quote.quote(&replacement.text),
                replacement.expression.cyan(),
                format!("line {}", replacement.line).dimmed()
            );
        }
        for conflict in &file.conflicts {
            let _ = writeln!(
                writer,
                "  {} \"{}\" not added to {}: \"{}\" already holds a value  {}",
                "conflict:".bold().yellow(),
                conflict.key,
                file.output.display(),
                conflict.segment,
                format!("line {}", conflict.line).dimmed()
            );
        }
    }

    let _ = writeln!(
        writer,
        "{} in {}",
        plural(plan.replacement_count(), "replacement", "replacements"),
        plural(plan.files.len(), "file", "files")
    );
}

pub fn print_apply_stats(stats: &ApplyStats) {
    let mut details = plural(stats.replacements_applied, "replacement", "replacements");
    if stats.imports_added > 0 {
        details.push_str(&format!(
            ", {}",
            plural(stats.imports_added, "import added", "imports added")
        ));
    }
    print_success(&format!(
        "Rewrote {} ({})",
        plural(stats.files_modified, "source file", "source files"),
        details
    ));
}

pub fn print_reconcile_plan(plan: &ReconcilePlan) {
    write_reconcile_plan(plan, &mut io::stdout().lock());
}

/// Distinct keys found in the log and their presence in each locale file.
pub fn write_reconcile_plan<W: Write>(plan: &ReconcilePlan, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Found {} in the log:",
        plural(plan.keys.len(), "missing translation key", "missing translation keys")
    );
    for key in &plan.keys {
        let _ = writeln!(writer, "- {}", key);
    }

    let _ = writeln!(writer);
    let _ = writeln!(writer, "{}", "=== Translation key check ===".bold());
    let _ = writeln!(
        writer,
        "{} {} {}",
        pad("Key", KEY_COLUMN_WIDTH),
        pad(&plan.primary_locale, LOCALE_COLUMN_WIDTH),
        pad(&plan.secondary_locale, LOCALE_COLUMN_WIDTH)
    );
    let _ = writeln!(
        writer,
        "{}",
        "-".repeat(KEY_COLUMN_WIDTH + 2 * LOCALE_COLUMN_WIDTH + 5)
    );
    for presence in &plan.presence {
        let _ = writeln!(
            writer,
            "{} {} {}",
            pad(&presence.key, KEY_COLUMN_WIDTH),
            presence_cell(presence.primary),
            presence_cell(presence.secondary)
        );
    }
    let _ = writeln!(
        writer,
        "{} to add",
        plural(plan.missing_count(), "placeholder", "placeholders")
    );
}

fn presence_cell(present: bool) -> String {
    let mark = if present {
        SUCCESS_MARK.green()
    } else {
        FAILURE_MARK.red()
    };
    format!("{}{}", mark, " ".repeat(LOCALE_COLUMN_WIDTH - 1))
}

pub fn print_add_report(report: &AddReport) {
    write_add_report(report, &mut io::stdout().lock());
}

pub fn write_add_report<W: Write>(report: &AddReport, writer: &mut W) {
    for added in &report.added {
        let _ = writeln!(
            writer,
            "Added \"{}\" to {}",
            added.key,
            added.locale.cyan()
        );
    }
    for conflict in &report.conflicts {
        let _ = writeln!(
            writer,
            "{}: cannot add \"{}\" to {}: \"{}\" already holds a value",
            "error".bold().red(),
            conflict.key,
            conflict.locale,
            conflict.segment
        );
    }
}
