//! Operator-facing output for the CLI commands.
//!
//! Each command has a `format_*` function (pure, returns lines) and a
//! `print_*` wrapper that writes to stdout. Diagnostics go through `tracing`
//! on stderr instead; stdout carries only results.
//!
//! ## Build
//!
//! ```text
//! Wrote ./rtty_offline/manifest.json (object, 4 items)
//! ```
//!
//! ## Check
//!
//! ```text
//! Groups
//! 001 ARTWORK-01 (3 items)
//!     000 002 010
//! 002 ARTWORK-03 (1 item)
//!     005
//!
//! Filter
//!     kept=4 dropped=0 total=4
//!
//! 4 items in 2 groups (items, base "rtty_offline")
//! ```

use crate::pipeline::RunOutcome;
use crate::project::Format;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// The success line printed after the manifest is written.
pub fn format_write_summary(outcome: &RunOutcome, path: &Path) -> String {
    format!(
        "Wrote {} ({}, {} items)",
        path.display(),
        outcome.manifest.shape(),
        outcome.manifest.item_count()
    )
}

pub fn print_write_summary(outcome: &RunOutcome, path: &Path) {
    println!("{}", format_write_summary(outcome, path));
}

/// Per-group listing of a run that was not written.
pub fn format_check_output(outcome: &RunOutcome, format: Format) -> Vec<String> {
    let mut lines = vec!["Groups".to_string()];

    if outcome.index.is_empty() {
        lines.push("    (none left after filtering)".to_string());
    }
    for (pos, (group, items)) in outcome.index.groups().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(pos + 1),
            group,
            plural(items.len(), "item")
        ));
        lines.push(format!("    {}", items.join(" ")));
    }

    lines.push(String::new());
    lines.push("Filter".to_string());
    lines.push(format!("    {}", outcome.stats));

    lines.push(String::new());
    let mut summary = format!(
        "{} in {} ({}",
        plural(outcome.manifest.item_count(), "item"),
        plural(outcome.index.group_count(), "group"),
        format
    );
    if let Some(base) = outcome.manifest.base() {
        summary.push_str(&format!(", base \"{base}\""));
    }
    summary.push(')');
    lines.push(summary);

    lines
}

pub fn print_check_output(outcome: &RunOutcome, format: Format) {
    for line in format_check_output(outcome, format) {
        println!("{}", line);
    }
}
